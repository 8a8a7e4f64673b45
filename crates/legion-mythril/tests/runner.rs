use legion_core::{Endpoint, Scheme};
use legion_mythril::{build_args, run, MythrilConfig, MythrilError, ScanRequest};

const CONTRACT: &str = "0x06012c8cf97bead5deae237070f9587f8e7a266d";

fn endpoint(uri: &str, scheme: Scheme, host: &str, port: u16) -> Endpoint {
    Endpoint {
        uri: uri.to_string(),
        scheme,
        host: host.to_string(),
        port,
    }
}

#[test]
fn default_request_builds_full_command_line() {
    let ep = endpoint("http://127.0.0.1:8545", Scheme::Http, "127.0.0.1", 8545);
    let request = ScanRequest::for_endpoint(CONTRACT, &ep, Vec::new(), 2, 2).unwrap();
    let args = build_args(&MythrilConfig::default(), &request);
    assert_eq!(
        args.join(" "),
        format!(
            "analyze -a {} --rpc 127.0.0.1:8545 -m ether_thief,selfdestruct -t 2 --execution-timeout 2 \
             --strategy bfs --loop-bound 3 --max-depth 64 --create-timeout 10 -o json",
            CONTRACT
        )
    );
}

#[test]
fn tls_endpoint_and_offline_storage_add_flags() {
    let ep = endpoint("https://mainnet.example", Scheme::Https, "mainnet.example", 443);
    let request = ScanRequest::for_endpoint(CONTRACT, &ep, vec!["suicide".into()], 3, 60).unwrap();
    let config = MythrilConfig {
        onchain_storage: false,
        ..Default::default()
    };
    let args = build_args(&config, &request);
    assert!(args.contains(&"--rpctls".to_string()));
    assert!(args.contains(&"--no-onchain-data".to_string()));
    assert!(args.windows(2).any(|w| w[0] == "--rpc" && w[1] == "mainnet.example:443"));
    assert!(args.windows(2).any(|w| w[0] == "-m" && w[1] == "suicide"));
}

#[test]
fn ipc_endpoint_is_unsupported() {
    let ep = endpoint("/tmp/geth.ipc", Scheme::Ipc, "/tmp/geth.ipc", 0);
    let err = ScanRequest::for_endpoint(CONTRACT, &ep, Vec::new(), 2, 2).unwrap_err();
    assert!(matches!(err, MythrilError::Unsupported(_)));
    assert!(legion_core::Error::from(err).is_warning());
}

#[tokio::test]
async fn missing_binary_is_reported() {
    let config = MythrilConfig {
        binary: "/nonexistent/legion-myth".to_string(),
        ..Default::default()
    };
    let ep = endpoint("http://127.0.0.1:8545", Scheme::Http, "127.0.0.1", 8545);
    let request = ScanRequest::for_endpoint(CONTRACT, &ep, Vec::new(), 2, 2).unwrap();
    assert!(matches!(run(&config, &request).await, Err(MythrilError::NotInstalled(_))));
}

#[cfg(unix)]
mod fake_binary {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("myth");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh\n{}", body).unwrap();
        drop(file);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn request() -> ScanRequest {
        let ep = endpoint("http://127.0.0.1:8545", Scheme::Http, "127.0.0.1", 8545);
        ScanRequest::for_endpoint(CONTRACT, &ep, Vec::new(), 2, 2).unwrap()
    }

    #[tokio::test]
    async fn issues_are_parsed_even_with_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let binary = script(
            &dir,
            r#"echo '{"error":null,"success":true,"issues":[{"title":"Unprotected Ether Withdrawal","swc-id":"105","severity":"High","function":"withdraw()","address":412,"description":"Anyone can withdraw ETH."}]}'
exit 1"#,
        );
        let config = MythrilConfig { binary, ..Default::default() };
        let report = run(&config, &request()).await.unwrap();
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].swc_id, "105");
    }

    #[tokio::test]
    async fn crash_without_report_is_process_failure() {
        let dir = tempfile::tempdir().unwrap();
        let binary = script(&dir, "echo 'solc not found' >&2\nexit 2");
        let config = MythrilConfig { binary, ..Default::default() };
        match run(&config, &request()).await {
            Err(MythrilError::ProcessFailed { code, stderr }) => {
                assert_eq!(code, Some(2));
                assert!(stderr.contains("solc"));
            }
            other => panic!("resultado inesperado: {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_analysis_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let binary = script(&dir, "sleep 5");
        let config = MythrilConfig {
            binary,
            process_timeout: 1,
            ..Default::default()
        };
        assert!(matches!(run(&config, &request()).await, Err(MythrilError::Timeout(1))));
    }
}
