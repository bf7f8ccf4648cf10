use pretty_assertions::assert_eq;
use sadl_shell::{Command, Field, ParseError};

#[test]
fn blank_lines_are_skipped() {
    assert_eq!(Command::parse("").unwrap(), None);
    assert_eq!(Command::parse("   \t").unwrap(), None);
}

#[test]
fn simple_commands() {
    assert_eq!(Command::parse("init").unwrap(), Some(Command::Init));
    assert_eq!(Command::parse("STATUS").unwrap(), Some(Command::Status));
    assert_eq!(Command::parse("  activate  ").unwrap(), Some(Command::Activate));
    assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    assert_eq!(Command::parse("fp").unwrap(), Some(Command::Fingerprint));
}

#[test]
fn arguments_are_passed_through() {
    assert_eq!(
        Command::parse("import abc.def").unwrap(),
        Some(Command::Import("abc.def".into()))
    );
    assert_eq!(
        Command::parse("decode  QUJD ").unwrap(),
        Some(Command::Decode(" QUJD ".into()))
    );
    // Left for the workflow to reject.
    assert_eq!(
        Command::parse("payload").unwrap(),
        Some(Command::Payload(String::new()))
    );
}

#[test]
fn set_fields() {
    assert_eq!(
        Command::parse("set years abc").unwrap(),
        Some(Command::Set(Field::Years, "abc".into()))
    );
    assert_eq!(
        Command::parse("set product").unwrap(),
        Some(Command::Set(Field::Product, String::new()))
    );
    assert_eq!(
        Command::parse("set url https://activation.example/v2").unwrap(),
        Some(Command::Set(Field::Url, "https://activation.example/v2".into()))
    );
    assert_eq!(
        Command::parse("set colour red").unwrap_err(),
        ParseError::UnknownField("colour".into())
    );
    assert_eq!(
        Command::parse("set").unwrap_err(),
        ParseError::MissingArgument("set")
    );
}

#[test]
fn log_count() {
    assert_eq!(Command::parse("log").unwrap(), Some(Command::Log(None)));
    assert_eq!(Command::parse("log 5").unwrap(), Some(Command::Log(Some(5))));
    assert_eq!(
        Command::parse("log many").unwrap_err(),
        ParseError::InvalidCount("many".into())
    );
}

#[test]
fn unknown_command() {
    let err = Command::parse("reboot now").unwrap_err();
    assert_eq!(err, ParseError::Unknown("reboot".into()));
    assert!(err.to_string().contains("help"));
}
