mod batch;
mod posix;
mod powershell;
mod template;

use std::fmt;
use std::str::FromStr;

use crate::clock::{self, Clock};
use crate::error::{GenerateError, Result};
use crate::record::{Record, ScriptContext};

use template::Dialect;

/// Where generated scripts look up the host's public IPv4 address.
pub const IP_ENDPOINT: &str = "http://ipv4.icanhazip.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    PosixShell,
    WindowsBatch,
    PowerShell,
}

impl ScriptFormat {
    #[cfg(test)]
    pub const ALL: [ScriptFormat; 3] = [
        ScriptFormat::PosixShell,
        ScriptFormat::WindowsBatch,
        ScriptFormat::PowerShell,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ScriptFormat::PosixShell => "sh",
            ScriptFormat::WindowsBatch => "bat",
            ScriptFormat::PowerShell => "ps1",
        }
    }

    pub fn default_file_name(self) -> String {
        format!("dns-update-script.{}", self.extension())
    }

    fn dialect(self) -> &'static Dialect {
        match self {
            ScriptFormat::PosixShell => &posix::DIALECT,
            ScriptFormat::WindowsBatch => &batch::DIALECT,
            ScriptFormat::PowerShell => &powershell::DIALECT,
        }
    }

    pub fn render(self, context: &ScriptContext, records: &[Record], clock: &dyn Clock) -> String {
        let generated_on = clock::iso8601(clock.now());
        template::render(self.dialect(), context, records, &generated_on)
    }
}

impl FromStr for ScriptFormat {
    type Err = GenerateError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "sh" | "posix-shell" => Ok(ScriptFormat::PosixShell),
            "bat" | "windows-batch" => Ok(ScriptFormat::WindowsBatch),
            "ps1" | "powershell" => Ok(ScriptFormat::PowerShell),
            other => Err(GenerateError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ScriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Generates the update script for the format named by `format`.
///
/// The HTTP layer parses the tag itself to name the download, so only
/// programmatic callers come through here.
#[allow(dead_code)]
pub fn generate(
    format: &str,
    context: &ScriptContext,
    records: &[Record],
    clock: &dyn Clock,
) -> Result<String> {
    let format: ScriptFormat = format.parse()?;
    Ok(format.render(context, records, clock))
}
