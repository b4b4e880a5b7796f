use super::*;
use pretty_assertions::assert_eq;

#[test]
fn scripted_yields_tokens_in_order() {
    let mut input = InputHandler::scripted("hello  world\n42\n");
    assert_eq!(input.read_token().expect("read"), Some("hello".into()));
    assert_eq!(input.read_token().expect("read"), Some("world".into()));
    assert_eq!(input.read_token().expect("read"), Some("42".into()));
    assert_eq!(input.read_token().expect("read"), None);
    assert_eq!(input.read_token().expect("read"), None);
}

#[test]
fn scripted_empty_is_closed() {
    let mut input = ScriptedInput::new("   \n ");
    assert_eq!(input.read_token(), None);
}
