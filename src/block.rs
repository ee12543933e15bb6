/// Art des Blocks im Level. Alle Arten sind per Ray testbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    Start,
    Step,
    Obstacle,
    Goal,
}

impl Block {
    pub fn color(self) -> [f32; 3] {
        match self {
            Block::Start => [0.27, 0.27, 0.27],
            Block::Step => [0.33, 0.33, 0.33],
            Block::Obstacle => [0.67, 0.20, 0.20],
            Block::Goal => [0.13, 0.27, 0.13],
        }
    }
}
