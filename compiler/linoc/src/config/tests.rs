use super::*;
use pretty_assertions::assert_eq;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn path_only() {
    let (path, config) = parse_run_args(&args(&["main.lino"])).expect("parses");
    assert_eq!(path, "main.lino");
    assert_eq!(config, RunConfig::default());
}

#[test]
fn flags_in_any_order() {
    let (path, config) =
        parse_run_args(&args(&["-v", "prog.lino", "--time", "-p", "-t", "--debug"]))
            .expect("parses");
    assert_eq!(path, "prog.lino");
    assert_eq!(
        config,
        RunConfig {
            debug: true,
            trace: true,
            dump: true,
            time: true,
            verbose: true,
            max_call_depth: None,
        }
    );
}

#[test]
fn max_depth_maps_to_engine_options() {
    let (_, config) =
        parse_run_args(&args(&["--max-depth=64", "--time", "a.lino"])).expect("parses");
    assert_eq!(
        config.engine_options(),
        EngineOptions {
            max_call_depth: Some(64),
            timing: true,
        }
    );
}

#[test]
fn rejects_bad_arguments() {
    assert_eq!(
        parse_run_args(&args(&["--fast", "a.lino"])),
        Err("unknown option '--fast'".to_string())
    );
    assert_eq!(
        parse_run_args(&args(&["a.lino", "b.lino"])),
        Err("unexpected argument 'b.lino'".to_string())
    );
    assert_eq!(
        parse_run_args(&args(&["-v"])),
        Err("missing file path".to_string())
    );
    assert!(parse_run_args(&args(&["--max-depth=lots", "a.lino"])).is_err());
}
