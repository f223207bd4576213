use std::io::Write;

use appactivator_sdk::{SdkError, SdkResult};

fn trace(label: &str) -> SdkResult<()> {
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

fn seed() -> SdkResult<()> {
    trace("beta.seed")
}

fn verify() -> SdkResult<()> {
    if std::env::var_os("APPACTIVATOR_FIXTURE_FAIL").is_some() {
        return Err(SdkError::internal("verification requested to fail"));
    }
    trace("beta.verify")
}

fn close() -> SdkResult<()> {
    trace("beta.close")
}

fn late() -> SdkResult<()> {
    trace("beta.late")
}

appactivator_sdk::export_activation_module! {
    name: "fixture.beta",
    markers: [
        pre_start seed { order: 10 },
        pre_start verify { order: 20 },
        shutdown close,
        pre_start late { order: 30 },
    ],
}
