use apogee_core::message::{parse_float_prefix, FlightCommand, Inbound};
use apogee_core::FlightState;

#[test]
fn literals_are_exact() {
    assert_eq!(Inbound::parse("true"), Inbound::Armed);
    assert_eq!(Inbound::parse("false"), Inbound::Waiting);

    for raw in ["TRUE", "True", " true", "true ", "false\n", "False", "tru", ""] {
        assert_eq!(Inbound::parse(raw), Inbound::Unrecognized, "raw={raw:?}");
    }
}

#[test]
fn numbers_become_apogee_readings() {
    assert_eq!(Inbound::parse("42.7"), Inbound::Apogee(42.7));
    assert_eq!(Inbound::parse("0"), Inbound::Apogee(0.0));
    assert_eq!(Inbound::parse("-3.5"), Inbound::Apogee(-3.5));
    assert_eq!(Inbound::parse("  128"), Inbound::Apogee(128.0));
    assert_eq!(Inbound::parse("1.5e3"), Inbound::Apogee(1500.0));
}

#[test]
fn trailing_garbage_after_a_number_is_tolerated() {
    assert_eq!(Inbound::parse("42.7xyz"), Inbound::Apogee(42.7));
    assert_eq!(Inbound::parse("12.5abc"), Inbound::Apogee(12.5));
    assert_eq!(Inbound::parse("7 m"), Inbound::Apogee(7.0));
    assert_eq!(Inbound::parse("1.2.3"), Inbound::Apogee(1.2));
}

#[test]
fn non_numeric_text_is_unrecognized() {
    for raw in ["abc", "NaN", "m 12", "--1", "e5", "."] {
        assert_eq!(Inbound::parse(raw), Inbound::Unrecognized, "raw={raw:?}");
    }
}

#[test]
fn float_prefix_edge_forms() {
    assert_eq!(parse_float_prefix(".5"), Some(0.5));
    assert_eq!(parse_float_prefix("5."), Some(5.0));
    assert_eq!(parse_float_prefix("+8"), Some(8.0));
    assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
    assert_eq!(parse_float_prefix("-Infinityish"), Some(f64::NEG_INFINITY));
    assert_eq!(parse_float_prefix("infinity"), None);
}

#[test]
fn commands_map_to_literals_and_expected_echo() {
    assert_eq!(FlightCommand::Start.payload(), "true");
    assert_eq!(FlightCommand::Stop.payload(), "false");
    assert_eq!(FlightCommand::Start.expected_state(), FlightState::Armed);
    assert_eq!(FlightCommand::Stop.expected_state(), FlightState::Waiting);
    assert!(FlightCommand::Start.prompt().contains("will be lost"));
    assert!(FlightCommand::Stop.prompt().contains("No data will be lost"));
}
