#![cfg(unix)]

use calcsites_core::context::Secret;
use calcsites_core::{CalcSitesError, Deployer};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Write an executable shell script
fn write_script(path: &Path, body: &str) {
    std::fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Fake deployment tool that records its working directory, arguments and token into `log_dir`
fn fake_tool(dir: &Path, log_dir: &Path, stdout: &str, exit_code: i32) -> PathBuf {
    let path = dir.join("fake-netlify");
    let log = log_dir.display();
    write_script(
        &path,
        &format!(
            "if [ \"$1\" = \"--version\" ]; then echo 'netlify-cli/17.0.0'; exit 0; fi\n\
             pwd -P > \"{log}/cwd\"\n\
             echo \"$@\" > \"{log}/args\"\n\
             echo \"$NETLIFY_AUTH_TOKEN\" > \"{log}/token\"\n\
             printf '{stdout}'\n\
             echo 'deploy failed: rate limited' >&2\n\
             exit {exit_code}",
        ),
    );
    path
}

fn read(path: PathBuf) -> String {
    std::fs::read_to_string(path).unwrap().trim().to_string()
}

#[tokio::test]
async fn successful_deploy_reports_live_url() {
    let tmp = tempfile::tempdir().unwrap();
    let site = tmp.path().join("bmi-calculator");
    std::fs::create_dir(&site).unwrap();
    let tool = fake_tool(tmp.path(), tmp.path(), "Deploying...\\nLive URL: https://x.test\\n", 0);

    let cwd_before = std::env::current_dir().unwrap();
    let deployer = Deployer::new(tool.to_string_lossy(), "NETLIFY_AUTH_TOKEN", Secret::new("nfp_test"));
    let outcome = deployer.deploy(&site, "bmi-calculator").await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.url.as_deref(), Some("https://x.test"));
    assert_eq!(std::env::current_dir().unwrap(), cwd_before);

    assert_eq!(read(tmp.path().join("cwd")), std::fs::canonicalize(&site).unwrap().to_string_lossy());
    assert_eq!(read(tmp.path().join("args")), "deploy --prod --dir . --message Auto-deploy: bmi-calculator");
    assert_eq!(read(tmp.path().join("token")), "nfp_test");
}

#[tokio::test]
async fn success_without_url_line() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = fake_tool(tmp.path(), tmp.path(), "Deploy is live!\\n", 0);

    let deployer = Deployer::new(tool.to_string_lossy(), "NETLIFY_AUTH_TOKEN", Secret::default());
    let outcome = deployer.deploy(tmp.path(), "site").await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.url, None);
}

#[tokio::test]
async fn non_zero_exit_is_a_failure_and_cwd_is_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let site = tmp.path().join("site");
    std::fs::create_dir(&site).unwrap();
    let tool = fake_tool(tmp.path(), tmp.path(), "Live URL: https://x.test\\n", 1);

    let cwd_before = std::env::current_dir().unwrap();
    let deployer = Deployer::new(tool.to_string_lossy(), "NETLIFY_AUTH_TOKEN", Secret::default());
    let outcome = deployer.deploy(&site, "site").await.unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.url, None);
    assert_eq!(std::env::current_dir().unwrap(), cwd_before);
}

#[tokio::test]
async fn missing_tool_is_an_error_and_cwd_is_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let cwd_before = std::env::current_dir().unwrap();
    let deployer = Deployer::new(
        tmp.path().join("no-such-tool").to_string_lossy(),
        "NETLIFY_AUTH_TOKEN",
        Secret::default(),
    );

    let err = deployer.deploy(tmp.path(), "site").await.unwrap_err();
    assert!(matches!(err, CalcSitesError::Deploy(_)));
    assert_eq!(std::env::current_dir().unwrap(), cwd_before);
}

#[tokio::test]
async fn pacing_delay_follows_failed_attempts() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = fake_tool(tmp.path(), tmp.path(), "", 1);
    let deployer = Deployer::new(tool.to_string_lossy(), "NETLIFY_AUTH_TOKEN", Secret::default())
        .with_delay(Duration::from_millis(200));

    let start = Instant::now();
    let outcome = deployer.deploy(tmp.path(), "site").await.unwrap();
    assert!(!outcome.success);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn message_flag_can_be_dropped() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = fake_tool(tmp.path(), tmp.path(), "", 0);
    let deployer = Deployer::new(tool.to_string_lossy(), "NETLIFY_AUTH_TOKEN", Secret::default())
        .with_message(false);

    deployer.deploy(tmp.path(), "site").await.unwrap();
    assert_eq!(read(tmp.path().join("args")), "deploy --prod --dir .");
}

#[tokio::test]
async fn ensure_cli_reports_version() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = fake_tool(tmp.path(), tmp.path(), "", 0);
    let deployer = Deployer::new(tool.to_string_lossy(), "NETLIFY_AUTH_TOKEN", Secret::default());

    assert_eq!(deployer.ensure_cli().await.unwrap(), "netlify-cli/17.0.0");
}

#[tokio::test]
async fn ensure_cli_installs_missing_tool() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = tmp.path().join("installed-netlify");
    let installer = tmp.path().join("install.sh");
    write_script(
        &installer,
        &format!(
            "printf '#!/bin/sh\\necho netlify-cli/18.1.0\\n' > \"{tool}\"\nchmod 755 \"{tool}\"",
            tool = tool.display()
        ),
    );

    let deployer = Deployer::new(tool.to_string_lossy(), "NETLIFY_AUTH_TOKEN", Secret::default())
        .with_install(installer.to_string_lossy());

    assert_eq!(deployer.ensure_cli().await.unwrap(), "netlify-cli/18.1.0");
    assert!(tool.is_file());
}

#[tokio::test]
async fn ensure_cli_fails_when_install_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let installer = tmp.path().join("install.sh");
    write_script(&installer, "exit 3");

    let deployer = Deployer::new(
        tmp.path().join("never-installed").to_string_lossy(),
        "NETLIFY_AUTH_TOKEN",
        Secret::default(),
    )
    .with_install(installer.to_string_lossy());

    assert!(matches!(deployer.ensure_cli().await, Err(CalcSitesError::Deploy(_))));
}
