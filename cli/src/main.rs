use std::{net::IpAddr, path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use server::{ServerOpts, StatusConfig, serve};

#[derive(Debug, Parser)]
#[command(version, about = "HTTP status endpoint for SSH users, logins and log events")]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the status server.
    Server {
        /// Address to listen on. `0.0.0.0` listens on all interfaces.
        #[arg(long, env = "SSH_STATUS_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on.
        #[arg(long, env = "SSH_STATUS_PORT", default_value_t = 8080)]
        port: u16,

        /// Log file whose last lines are served on `/relatorio`.
        #[arg(long, env = "SSH_STATUS_LOG_FILE", default_value = "/var/log/ssh_manager.log")]
        log_file: PathBuf,

        /// User database listed on `/usuarios`.
        #[arg(long, env = "SSH_STATUS_PASSWD_FILE", default_value = "/etc/passwd")]
        passwd_file: PathBuf,

        /// Smallest UID considered a human account.
        #[arg(long, env = "SSH_STATUS_MIN_UID", default_value_t = 1000)]
        min_uid: u32,

        /// Account never listed on `/usuarios`.
        #[arg(long, env = "SSH_STATUS_RESERVED_USER", default_value = "nobody")]
        reserved_user: String,

        /// SSH port, by service name or number, used to filter `/logins`.
        #[arg(long, env = "SSH_STATUS_SSH_PORT", default_value = "ssh")]
        ssh_port: String,

        /// Number of log lines served on `/relatorio`.
        #[arg(long, env = "SSH_STATUS_REPORT_LINES", default_value_t = 10)]
        report_lines: usize,

        /// Kill a status command that runs longer than this. Unbounded by default.
        #[arg(long, env = "SSH_STATUS_COMMAND_TIMEOUT_SECS")]
        command_timeout_secs: Option<u64>,

        /// Requests served at the same time. `1` serves them one after another.
        #[arg(long, env = "SSH_STATUS_MAX_CONCURRENT_REQUESTS", default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        max_concurrent_requests: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Args::parse().cmd {
        Command::Server {
            host,
            port,
            log_file,
            passwd_file,
            min_uid,
            reserved_user,
            ssh_port,
            report_lines,
            command_timeout_secs,
            max_concurrent_requests,
        } => {
            serve(ServerOpts {
                host,
                port,
                status: StatusConfig {
                    passwd_file,
                    min_uid,
                    reserved_user,
                    ssh_port,
                    log_file,
                    report_lines,
                },
                command_timeout: command_timeout_secs.map(Duration::from_secs),
                max_concurrent_requests: usize::from(max_concurrent_requests),
            })
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_status_config() {
        let Command::Server {
            host,
            port,
            log_file,
            passwd_file,
            min_uid,
            reserved_user,
            ssh_port,
            report_lines,
            command_timeout_secs,
            max_concurrent_requests,
        } = Args::parse_from(["ssh-status", "server"]).cmd;

        let defaults = StatusConfig::default();
        assert_eq!(host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(port, 8080);
        assert_eq!(log_file, defaults.log_file);
        assert_eq!(passwd_file, defaults.passwd_file);
        assert_eq!(min_uid, defaults.min_uid);
        assert_eq!(reserved_user, defaults.reserved_user);
        assert_eq!(ssh_port, defaults.ssh_port);
        assert_eq!(report_lines, defaults.report_lines);
        assert_eq!(command_timeout_secs, None);
        assert_eq!(max_concurrent_requests, 1);
    }

    #[test]
    fn rejects_zero_concurrency() {
        let res = Args::try_parse_from(["ssh-status", "server", "--max-concurrent-requests", "0"]);
        assert!(res.is_err());
    }
}
