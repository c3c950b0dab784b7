use std::path::{Path, PathBuf};

/// Where the status data comes from and how much of it to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    /// User database read by `/usuarios`.
    pub passwd_file: PathBuf,
    /// Accounts below this UID are service accounts and never listed.
    pub min_uid: u32,
    /// Placeholder account excluded even when its UID passes `min_uid`.
    pub reserved_user: String,
    /// Port name or number that `ss` filters destination ports on.
    pub ssh_port: String,
    /// Log tailed by `/relatorio`.
    pub log_file: PathBuf,
    pub report_lines: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            passwd_file: PathBuf::from("/etc/passwd"),
            min_uid: 1000,
            reserved_user: String::from("nobody"),
            ssh_port: String::from("ssh"),
            log_file: PathBuf::from("/var/log/ssh_manager.log"),
            report_lines: 10,
        }
    }
}

impl StatusConfig {
    pub fn users_command(&self) -> String {
        format!(
            "reserved={} awk -F: -v min_uid={} '$3 >= min_uid && $1 != ENVIRON[\"reserved\"] {{print $1}}' {}",
            quote(&self.reserved_user),
            self.min_uid,
            quote_path(&self.passwd_file),
        )
    }

    pub fn logins_command(&self) -> String {
        format!(
            "ss -o state established {} | awk '/ESTAB/ {{print $6}}' | cut -d':' -f1 | sort | uniq -c",
            quote(&format!("( dport = :{} )", self.ssh_port)),
        )
    }

    pub fn report_command(&self) -> String {
        format!(
            "tail -n {} {}",
            self.report_lines,
            quote_path(&self.log_file)
        )
    }
}

fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy())
}

/// POSIX shell quoting: words made only of safe characters pass through,
/// anything else is wrapped in single quotes.
fn quote(word: &str) -> String {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "_-./:=,+@%".contains(c);

    if !word.is_empty() && word.chars().all(is_safe) {
        return word.to_owned();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}
