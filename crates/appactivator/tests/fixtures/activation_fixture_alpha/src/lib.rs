use std::io::Write;

use appactivator_sdk::{ActLogLevel, SdkResult, host_log};

fn trace(label: &str) -> SdkResult<()> {
    host_log(ActLogLevel::Debug, &format!("fixture invoked {label}"));
    let Some(path) = std::env::var_os("APPACTIVATOR_FIXTURE_TRACE") else {
        return Ok(());
    };
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "{label}")?;
    Ok(())
}

fn configure() -> SdkResult<()> {
    trace("alpha.configure")
}

fn register_routes() -> SdkResult<()> {
    trace("alpha.register_routes")
}

fn flush() -> SdkResult<()> {
    trace("alpha.flush")
}

appactivator_sdk::export_activation_module! {
    name: "fixture.alpha",
    markers: [
        pre_start configure { order: 10 },
        pre_start register_routes { order: -5, run_in_designer_mode: true },
        shutdown flush { order: 1 },
    ],
}
