#![allow(dead_code)]

use restconfig::adapters::ini_config_adapter::IniConfigAdapter;

/// Awkward names and values that must survive the HTTP path unchanged.
pub const ODD_SECTION: &str = "odd/name";
pub const ODD_OPTION: &str = "key with space";
pub const ODD_VALUE: &str = "a+b %20 \"quoted\" ünïcode ";

/// Default section with `timeout = 30`; section `TEST` with `val1 = 42` plus
/// typed values; one section whose names need percent-encoding.
pub fn fixture_adapter() -> IniConfigAdapter {
    let mut adapter = IniConfigAdapter::new();
    adapter.set("DEFAULT", "timeout", "30");
    adapter.add_section("TEST");
    adapter.set("TEST", "val1", "42");
    adapter.set("TEST", "ratio", "0.25");
    adapter.set("TEST", "enabled", "yes");
    adapter.set("TEST", "label", "forty two");
    adapter.set("TEST", "empty", "");
    adapter.set(ODD_SECTION, ODD_OPTION, ODD_VALUE);
    adapter
}

/// Serve `app` on an ephemeral port from a background thread and return its
/// base URL. The listener is bound before returning, so requests may be sent
/// immediately.
#[cfg(feature = "server")]
pub fn spawn_server(app: axum::Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/config")
}
