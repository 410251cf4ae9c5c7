use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::starter::config::{self, Config};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Multiplexer configuration file, rendered in place
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "MULTIPLEXER_CONFIG",
        default_value = config::CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Read the template from FILE instead of the configuration file
    #[arg(long, global = true, value_name = "FILE", env = "MULTIPLEXER_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Network-join settings (JSON); defaults are used when the file is missing
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "MULTIPLEXER_JOIN_CONFIG",
        default_value = config::JOIN_CONFIG_FILE
    )]
    pub join_config: PathBuf,

    /// Multiplexer executable
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "MULTIPLEXER_BIN",
        default_value = config::MULTIPLEXER_BIN
    )]
    pub multiplexer: PathBuf,

    /// Directory with one entry per network interface
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "MULTIPLEXER_SYSFS_NET",
        default_value = config::SYSFS_NET
    )]
    pub sysfs_net: PathBuf,

    #[arg(
        long,
        global = true,
        value_name = "NAME",
        default_value = config::ETHERNET_INTERFACE
    )]
    pub ethernet_interface: String,

    #[arg(
        long,
        global = true,
        value_name = "NAME",
        default_value = config::WIFI_INTERFACE
    )]
    pub wifi_interface: String,

    /// Keep going with an empty gateway identifier when no hardware address is found
    #[arg(long, global = true)]
    pub allow_empty_gateway_id: bool,

    /// Log output format
    #[arg(
        long,
        global = true,
        value_enum,
        env = "LOG_FORMAT",
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Render the configuration and run the multiplexer (default)
    Run {
        /// Arguments passed to the multiplexer
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Render the configuration without running the multiplexer
    Render,
    /// Print the gateway identifier
    GatewayId,
}

impl Cli {
    /// Splits the parsed command line into the run configuration and the command to execute.
    pub fn into_parts(self) -> (Config, Commands) {
        let command = self.command.unwrap_or(Commands::Run { args: Vec::new() });

        let multiplexer_args = match &command {
            Commands::Run { args } => args.clone(),
            _ => Vec::new(),
        };

        let config = Config {
            config_path: self.config,
            template_path: self.template,
            join_config_path: self.join_config,
            multiplexer: self.multiplexer,
            multiplexer_args,
            sysfs_net: self.sysfs_net,
            ethernet_interface: self.ethernet_interface,
            wifi_interface: self.wifi_interface,
            allow_empty_gateway_id: self.allow_empty_gateway_id,
        };

        (config, command)
    }
}
