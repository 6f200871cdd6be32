use crate::control::{ControlCommand, ControlReply, apply};
use crate::snapshot::CaptureState;
use pretty_assertions::assert_eq;

fn parse(s: &str) -> ControlCommand {
    s.parse().unwrap()
}

#[test]
fn commands_are_case_insensitive() {
    assert_eq!(parse("on"), ControlCommand::On);
    assert_eq!(parse("OFF"), ControlCommand::Off);
    assert_eq!(parse(" Toggle \r"), ControlCommand::Toggle);
    assert_eq!(parse("status"), ControlCommand::Status);
    assert_eq!(parse("QUIT"), ControlCommand::Quit);
    assert_eq!(parse("reboot"), ControlCommand::Unknown("reboot".into()));
}

#[test]
fn on_off_toggle_change_only_the_enabled_flag() {
    let state = CaptureState::new(true);

    assert_eq!(
        apply(&ControlCommand::Off, &state),
        ControlReply::Capture { enabled: false }
    );
    assert!(!state.is_enabled());

    assert_eq!(
        apply(&ControlCommand::Toggle, &state),
        ControlReply::Capture { enabled: true }
    );
    assert_eq!(
        apply(&ControlCommand::On, &state),
        ControlReply::Capture { enabled: true }
    );
    assert!(state.is_enabled());
    assert!(!state.is_in_flight());
}

#[test]
fn status_reports_counters() {
    let state = CaptureState::new(false);
    let ControlReply::Status(status) = apply(&ControlCommand::Status, &state) else {
        panic!("expected a status reply");
    };
    assert!(!status.enabled);

    let text = ControlReply::Status(status).to_string();
    assert_eq!(text, "capture=off in_flight=false completed=0 failed=0");
}

#[test]
fn quit_and_unknown_leave_state_alone() {
    let state = CaptureState::new(true);

    assert_eq!(apply(&ControlCommand::Quit, &state), ControlReply::Quitting);
    let reply = apply(&ControlCommand::Unknown("x".into()), &state);
    assert!(reply.to_string().contains("unknown command 'x'"));
    assert!(state.is_enabled());
}
