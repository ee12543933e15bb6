use crate::input::InputScheme;

pub const TOUCH_HINT: &str = "Drag to look. Use joystick to move. Tap JUMP.";
pub const DESKTOP_HINT: &str = "Click to lock pointer, then move mouse to look.";
pub const LOCKED_HINT: &str = "Pointer locked - move mouse to look. WASD move, Shift run, Space jump.";
pub const UNLOCKED_HINT: &str = "Click to lock pointer.";

/// Hinweistext für die aktuelle Steuerung.
pub fn instructions(scheme: InputScheme, pointer_locked: bool, ever_locked: bool) -> &'static str {
    match scheme {
        InputScheme::Touch => TOUCH_HINT,
        InputScheme::Desktop if pointer_locked => LOCKED_HINT,
        InputScheme::Desktop if ever_locked => UNLOCKED_HINT,
        InputScheme::Desktop => DESKTOP_HINT,
    }
}

pub fn format_time(seconds: f64) -> String {
    format!("Time: {:.2}s", seconds)
}

pub fn win_message(scheme: InputScheme, seconds: f64) -> String {
    let restart = match scheme {
        InputScheme::Touch => "tap to restart",
        InputScheme::Desktop => "press R to restart",
    };
    format!("You win! {} - {}", format_time(seconds), restart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_has_two_decimals() {
        assert_eq!(format_time(12.346), "Time: 12.35s");
        assert_eq!(format_time(0.0), "Time: 0.00s");
    }

    #[test]
    fn hints_follow_scheme_and_lock() {
        assert_eq!(instructions(InputScheme::Touch, true, true), TOUCH_HINT);
        assert_eq!(instructions(InputScheme::Desktop, false, false), DESKTOP_HINT);
        assert_eq!(instructions(InputScheme::Desktop, true, true), LOCKED_HINT);
        assert_eq!(instructions(InputScheme::Desktop, false, true), UNLOCKED_HINT);
    }

    #[test]
    fn win_message_names_restart() {
        let msg = win_message(InputScheme::Desktop, 3.0);
        assert!(msg.contains("Time: 3.00s"));
        assert!(msg.contains("press R"));
    }
}
