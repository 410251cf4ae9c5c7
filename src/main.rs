pub mod cli;
pub mod errors;
pub mod starter;

use std::process;

use clap::Parser;

use cli::{Cli, Commands, LogFormat};
use starter::{launcher, Starter};

use tracing::{error, info, level_filters::LevelFilter, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Exit code for any failure of the shim itself, before the multiplexer runs.
const SETUP_FAILURE: i32 = 1;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("LOG")
        .from_env_lossy();

    // NOTE: Logs go to stderr so stdout stays free for the multiplexer and `gateway-id`.
    let builder = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    }
    .expect("setting default subscriber failed");
}

/// Runs `command` to completion and returns the code the process exits with.
async fn execute(starter: &Starter, command: Commands) -> i32 {
    match command {
        Commands::GatewayId => match starter.resolve_identity().await {
            Ok(gateway_id) => {
                println!("{}", gateway_id);

                0
            }
            Err(e) => {
                error!(kind = ?e.kind(), "Error resolving gateway identifier: {}", e);

                SETUP_FAILURE
            }
        },
        Commands::Render => match starter.prepare().await {
            Ok(_) => 0,
            Err(e) => {
                error!(kind = ?e.kind(), "Error preparing multiplexer config: {}", e);

                SETUP_FAILURE
            }
        },
        Commands::Run { .. } => {
            info!("Preparing multiplexer config...");
            if let Err(e) = starter.prepare().await {
                error!(kind = ?e.kind(), "Error preparing multiplexer config: {}", e);

                return SETUP_FAILURE;
            }

            info!(multiplexer = %starter.config.multiplexer.display(), "Launching multiplexer...");
            match starter.launch().await {
                Ok(status) => {
                    let code = launcher::exit_code(&status);
                    info!(code = code, "Multiplexer done");

                    code
                }
                Err(e) => {
                    error!(kind = ?e.kind(), "Error launching multiplexer: {}", e);

                    SETUP_FAILURE
                }
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Multiplexer starter version"
    );

    let (config, command) = cli.into_parts();

    info!(config = %config.config_path.display(), "Multiplexer config");

    let starter = Starter::new(config);

    let code = execute(&starter, command).await;

    process::exit(code);
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, path::Path};

    use super::*;
    use starter::config::Config;

    /// Config rooted in `dir`, with `eth0` reporting `mac` and the multiplexer being `/bin/sh -c`.
    fn config_in(dir: &Path, mac: &str, script: &str) -> Config {
        let net = dir.join("net");
        fs::create_dir_all(net.join("eth0")).unwrap();
        fs::write(net.join("eth0").join("address"), mac).unwrap();

        Config {
            config_path: dir.join("chirpstack-packet-multiplexer.toml"),
            join_config_path: dir.join("ttn_config.json"),
            sysfs_net: net,
            multiplexer: "/bin/sh".into(),
            multiplexer_args: vec!["-c".to_string(), script.to_string()],
            ..Default::default()
        }
    }

    fn run() -> Commands {
        Commands::Run { args: Vec::new() }
    }

    #[tokio::test]
    async fn test_run_returns_multiplexer_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "aa:bb:cc:dd:ee:ff\n", "exit 7");
        fs::write(&config.config_path, "gateway_id=\"{{ gateway_id }}\"\n").unwrap();

        let code = execute(&Starter::new(config.clone()), run()).await;

        assert_eq!(code, 7);
        assert_eq!(
            fs::read_to_string(&config.config_path).unwrap(),
            "gateway_id=\"aabbccddeeff\"\n"
        );
    }

    #[tokio::test]
    async fn test_run_sees_rendered_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("chirpstack-packet-multiplexer.toml");
        let script = format!("grep -q aabbccddeeff {}", config_path.display());
        let config = config_in(dir.path(), "aa:bb:cc:dd:ee:ff\n", &script);
        fs::write(&config.config_path, "gateway_id=\"{{ gateway_id }}\"\n").unwrap();

        let code = execute(&Starter::new(config), run()).await;

        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_setup_failure_skips_launch() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("launched");
        let script = format!("touch {}", marker.display());
        // No template on disk.
        let config = config_in(dir.path(), "aa:bb:cc:dd:ee:ff\n", &script);

        let code = execute(&Starter::new(config), run()).await;

        assert_eq!(code, SETUP_FAILURE);
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_no_address_skips_launch() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("launched");
        let script = format!("touch {}", marker.display());
        let config = config_in(dir.path(), "", &script);
        fs::write(&config.config_path, "gateway_id=\"{{ gateway_id }}\"\n").unwrap();

        let code = execute(&Starter::new(config), run()).await;

        assert_eq!(code, SETUP_FAILURE);
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_missing_multiplexer_is_setup_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            multiplexer: dir.path().join("chirpstack-packet-multiplexer"),
            ..config_in(dir.path(), "aa:bb:cc:dd:ee:ff\n", "exit 0")
        };
        fs::write(&config.config_path, "gateway_id=\"{{ gateway_id }}\"\n").unwrap();

        let code = execute(&Starter::new(config), run()).await;

        assert_eq!(code, SETUP_FAILURE);
    }

    #[tokio::test]
    async fn test_render_does_not_launch() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("launched");
        let script = format!("touch {}", marker.display());
        let config = config_in(dir.path(), "aa:bb:cc:dd:ee:ff\n", &script);
        fs::write(&config.config_path, "gateway_id=\"{{ gateway_id }}\"\n").unwrap();

        let code = execute(&Starter::new(config.clone()), Commands::Render).await;

        assert_eq!(code, 0);
        assert!(!marker.exists());
        assert_eq!(
            fs::read_to_string(&config.config_path).unwrap(),
            "gateway_id=\"aabbccddeeff\"\n"
        );
    }

    #[tokio::test]
    async fn test_gateway_id_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "", "exit 0");

        let code = execute(&Starter::new(config), Commands::GatewayId).await;

        assert_eq!(code, SETUP_FAILURE);
    }
}
