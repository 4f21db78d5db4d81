//! End-to-end shell tests over the hosted board assembly.

use ember_boot::sets;
use ember_core::console::{self, BufferConsole};
use ember_core::Error;

#[test]
fn test_version_succeeds() {
    let (shell, mut ctx) = sets::boot();
    assert_eq!(shell.run_line(&mut ctx, "version"), 0);
}

#[test]
fn test_unknown_command_reports_its_code() {
    let (shell, mut ctx) = sets::boot();
    assert_eq!(
        shell.run_line(&mut ctx, "no-such-command"),
        Error::UnknownCommand.code()
    );
    // The session survives the miss.
    assert_eq!(shell.run_line(&mut ctx, "version"), 0);
}

#[test]
fn test_setenv_printenv_round_trip() {
    let (shell, mut ctx) = sets::boot();
    assert_eq!(shell.run_line(&mut ctx, "setenv cmdline quiet splash"), 0);
    assert_eq!(shell.run_line(&mut ctx, "printenv"), 0);
    let env = ctx.env.as_ref().unwrap();
    assert_eq!(env.get("cmdline"), Some("quiet splash".into()));
    // Untouched keys still come from the catalog.
    assert_eq!(env.get("autoboot"), None);
}

#[test]
fn test_setenv_without_value_is_invalid() {
    let (shell, mut ctx) = sets::boot();
    assert_eq!(
        shell.run_line(&mut ctx, "setenv cmdline"),
        Error::InvalidParameter.code()
    );
}

#[test]
fn test_compare_equal_regions() {
    let (shell, mut ctx) = sets::boot();
    // A fresh part is uniformly erased; two disjoint windows match.
    assert_eq!(shell.run_line(&mut ctx, "compare nor:0+1k nor:1k+1k"), 0);
}

#[test]
fn test_compare_default_driver_prefix_optional() {
    let (shell, mut ctx) = sets::boot();
    assert_eq!(shell.run_line(&mut ctx, "compare 0+16 1k+16"), 0);
}

#[test]
fn test_compare_detects_difference() {
    let (shell, mut ctx) = sets::boot();
    {
        let mut d = ctx.open_region("nor:0+16").unwrap();
        d.write(&[0xAA]).unwrap();
    }
    assert_eq!(
        shell.run_line(&mut ctx, "compare nor:0+16 nor:1k+16"),
        Error::Mismatch.code()
    );
}

#[test]
fn test_compare_count_must_be_positive() {
    let (shell, mut ctx) = sets::boot();
    assert_eq!(
        shell.run_line(&mut ctx, "compare -c 0 nor:0+16 nor:1k+16"),
        Error::InvalidParameter.code()
    );
    assert_eq!(
        shell.run_line(&mut ctx, "compare -c x nor:0+16 nor:1k+16"),
        Error::InvalidParameter.code()
    );
}

#[test]
fn test_compare_unknown_driver() {
    let (shell, mut ctx) = sets::boot();
    assert_eq!(
        shell.run_line(&mut ctx, "compare nand:0+16 nor:0+16"),
        Error::UnknownDriver.code()
    );
}

#[test]
fn test_help_and_info_output() {
    let console = BufferConsole::new();
    let capture = console.handle();
    console::set_console(Box::new(console));

    let (shell, mut ctx) = sets::boot();
    assert_eq!(shell.run_line(&mut ctx, "help"), 0);
    assert_eq!(shell.run_line(&mut ctx, "help compare"), 0);
    assert_eq!(shell.run_line(&mut ctx, "info"), 0);
    assert_eq!(shell.run_line(&mut ctx, "drivers"), 0);

    let out = capture.lock().clone();
    assert!(out.contains("compare"));
    assert!(out.contains("compare [-c COUNT] REGION REGION"));
    assert!(out.contains("env:"));
    assert!(out.contains("net:"));
    assert!(out.contains("nor"));
    assert!(out.contains("eth0"));
}

#[test]
fn test_unknown_key_round_trips_through_overflow_cell() {
    let (shell, mut ctx) = sets::boot();
    assert_eq!(shell.run_line(&mut ctx, "setenv custom hello"), 0);
    let env = ctx.env.as_ref().unwrap();
    assert_eq!(env.get("custom"), Some("hello".into()));
}
