use crate::types::{AsfError, AsfResult};
use std::path::{Path, PathBuf};

/// Earthdata host recorded in the credentials file
pub const EARTHDATA_HOST: &str = "urs.earthdata.nasa.gov";

/// Saved machine credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Persistence for remote-service credentials
///
/// Abstracted so the login flow can be exercised against an in-memory double.
pub trait CredentialStore {
    fn save(&self, host: &str, login: &str, password: &str) -> AsfResult<()>;
    fn load(&self, host: &str) -> AsfResult<Option<Credentials>>;
}

/// netrc-format credential file at a fixed per-user location
///
/// `save` overwrites the whole file with a single
/// `machine <host> login <user> password <pass>` line. The password is stored
/// in plaintext; that is the netrc format shared with other Earthdata tooling,
/// not a choice this crate gets to make.
pub struct NetrcStore {
    path: PathBuf,
}

impl NetrcStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        NetrcStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The conventional `~/.netrc` location
    pub fn default_location() -> AsfResult<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            AsfError::InvalidInput("cannot determine the user home directory".to_string())
        })?;
        Ok(NetrcStore::new(home.join(".netrc")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for NetrcStore {
    fn save(&self, host: &str, login: &str, password: &str) -> AsfResult<()> {
        let line = format!("machine {} login {} password {}\n", host, login, password);
        std::fs::write(&self.path, line)?;
        log::debug!("Credentials for {} written to {}", host, self.path.display());
        Ok(())
    }

    fn load(&self, host: &str) -> AsfResult<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if let ["machine", machine, "login", login, "password", password] = fields[..] {
                if machine == host {
                    return Ok(Some(Credentials {
                        login: login.to_string(),
                        password: password.to_string(),
                    }));
                }
            }
        }
        Ok(None)
    }
}
