use std::sync::{Arc, Mutex};

use appactivator::{ActivationContext, Error, StaticModule, StaticModuleSource, lifecycle, logging};

#[test]
fn global_entry_points_follow_run_once_and_reset_rules() {
    logging::init_tracing();
    logging::init_tracing();

    let log = Arc::new(Mutex::new(Vec::<&'static str>::new()));
    let pre = Arc::clone(&log);
    let post = Arc::clone(&log);
    let source = StaticModuleSource::new().with_module(
        StaticModule::new("host")
            .pre_start("boot", move || {
                pre.lock().unwrap().push("boot");
                Ok(())
            })
            .shutdown("stop", move || {
                post.lock().unwrap().push("stop");
                Ok(())
            }),
    );
    lifecycle::install(ActivationContext::new(source)).expect("install global context");
    assert!(matches!(
        lifecycle::install(ActivationContext::new(StaticModuleSource::new())),
        Err(Error::AlreadyInstalled)
    ));

    lifecycle::run_pre_start().expect("pre-start");
    lifecycle::run_pre_start().expect("pre-start again");
    assert_eq!(*log.lock().unwrap(), ["boot"]);

    lifecycle::run_shutdown().expect("shutdown");
    lifecycle::run_shutdown().expect("shutdown again");
    assert_eq!(*log.lock().unwrap(), ["boot", "stop", "stop"]);

    lifecycle::reset();
    assert!(!lifecycle::global().expect("installed").has_run_pre_start());
    lifecycle::run_pre_start().expect("pre-start after reset");
    assert_eq!(*log.lock().unwrap(), ["boot", "stop", "stop", "boot"]);
}
