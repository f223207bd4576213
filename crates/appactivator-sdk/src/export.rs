use crate::{ActActivationKind, ActActivationMarker, ActStatus, ActStr};

/// Compile-time description of one activation marker.
///
/// `export_activation_module!` builds one of these per declared method and lowers it with
/// [`MarkerSpec::to_ffi`]. Every setter is `const` so the whole table lives in a `static`.
#[derive(Debug, Clone, Copy)]
pub struct MarkerSpec {
    pub kind: ActActivationKind,
    pub order: i32,
    pub run_in_designer_mode: bool,
    pub method_name: &'static str,
    pub invoke: extern "C" fn() -> ActStatus,
}

impl MarkerSpec {
    pub const DEFAULT_ORDER: i32 = 0;

    pub const fn new(
        kind: ActActivationKind,
        method_name: &'static str,
        invoke: extern "C" fn() -> ActStatus,
    ) -> Self {
        Self {
            kind,
            order: Self::DEFAULT_ORDER,
            run_in_designer_mode: false,
            method_name,
            invoke,
        }
    }

    pub const fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub const fn run_in_designer_mode(mut self, run_in_designer_mode: bool) -> Self {
        self.run_in_designer_mode = run_in_designer_mode;
        self
    }

    pub const fn to_ffi(self) -> ActActivationMarker {
        ActActivationMarker {
            kind: self.kind.to_raw(),
            order: self.order,
            run_in_designer_mode: self.run_in_designer_mode,
            method_name_utf8: ActStr::from_static(self.method_name),
            invoke: self.invoke,
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __act_kind {
    (pre_start) => {
        $crate::ActActivationKind::PreStart
    };
    (shutdown) => {
        $crate::ActActivationKind::Shutdown
    };
}

/// Export the activation markers of this module.
///
/// ```ignore
/// appactivator_sdk::export_activation_module! {
///     name: "orders",
///     markers: [
///         pre_start register_routes { order: -10, run_in_designer_mode: true },
///         pre_start warm_caches { order: 5 },
///         shutdown flush_journal,
///     ],
/// }
/// ```
///
/// Markers keep their declaration order inside the generated table; the host uses it to break
/// ties between equal `order` values. Methods take no arguments and return either `()` or
/// [`SdkResult<()>`](crate::SdkResult).
#[macro_export]
macro_rules! export_activation_module {
    (
        name: $module_name:literal,
        markers: [
            $(
                $kind:ident $method:path $({ $($key:ident : $value:expr),* $(,)? })?
            ),* $(,)?
        ]
        $(,)?
    ) => {
        static __ACT_MARKERS: &[$crate::ActActivationMarker] = &[
            $(
                {
                    extern "C" fn __act_invoke() -> $crate::ActStatus {
                        $crate::ffi_guard::guard_status(stringify!($method), || {
                            $crate::IntoActivationStatus::into_status($method())
                        })
                    }
                    $crate::MarkerSpec::new($crate::__act_kind!($kind), stringify!($method), __act_invoke)
                        $($( .$key($value) )*)?
                        .to_ffi()
                }
            ),*
        ];

        extern "C" fn __act_marker_count() -> usize {
            __ACT_MARKERS.len()
        }

        extern "C" fn __act_marker_get(index: usize) -> *const $crate::ActActivationMarker {
            match __ACT_MARKERS.get(index) {
                Some(marker) => marker as *const $crate::ActActivationMarker,
                None => core::ptr::null(),
            }
        }

        static __ACT_MODULE: $crate::ActActivationModule = $crate::ActActivationModule {
            api_version: $crate::APPACTIVATOR_API_VERSION,
            module_name_utf8: $crate::ActStr::from_static($module_name),
            module_free: Some($crate::module_free),
            marker_count: __act_marker_count,
            marker_get: __act_marker_get,
        };

        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn appactivator_module_entry(
            host: *const $crate::ActHostVTable,
        ) -> *const $crate::ActActivationModule {
            unsafe { $crate::__set_host_vtable(host) };
            &__ACT_MODULE
        }
    };
}
