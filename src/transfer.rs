// src/transfer.rs
//! SFTP copy of a local file (normally a key record) to a remote host
//!
//! Password authentication only. The file is sent as-is; its contents are
//! never inspected.

use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::net::TcpStream;
use std::path::{Path, PathBuf};

use ssh2::Session;
use tracing::{debug, info};

use crate::aliases::Passphrase;
use crate::error::CoreError;
use crate::CoreResult as Result;

pub const DEFAULT_SSH_PORT: u16 = 22;

/// Blocking-call timeout for the SSH session, in milliseconds
const SESSION_TIMEOUT_MS: u32 = 30_000;

/// Where and as whom to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub remote_path: String,
}

impl RemoteTarget {
    /// `host` may carry a `:port` suffix; port 22 otherwise
    pub fn new(host: &str, username: impl Into<String>, remote_path: impl Into<String>) -> Result<Self> {
        let host = host.trim();
        let (host, port) = match host.rsplit_once(':') {
            Some((name, port)) if !name.contains(':') => {
                let port = port
                    .parse()
                    .map_err(|_| CoreError::Transfer(format!("invalid port in {host:?}")))?;
                (name, port)
            }
            _ => (host, DEFAULT_SSH_PORT),
        };
        if host.is_empty() {
            return Err(CoreError::Transfer("host must not be empty".into()));
        }

        let username = username.into();
        if username.trim().is_empty() {
            return Err(CoreError::Transfer("username must not be empty".into()));
        }

        Ok(Self {
            host: host.to_owned(),
            port,
            username,
            remote_path: remote_path.into(),
        })
    }

    /// Remote destination for `local`
    ///
    /// An empty remote path or one ending in `/` names a directory, and the
    /// local file name is appended.
    pub fn destination_for(&self, local: &Path) -> PathBuf {
        let name = local.file_name().map(PathBuf::from).unwrap_or_default();
        if self.remote_path.is_empty() {
            name
        } else if self.remote_path.ends_with('/') {
            Path::new(&self.remote_path).join(name)
        } else {
            PathBuf::from(&self.remote_path)
        }
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.username, self.host, self.port)
    }
}

fn ssh_err(e: ssh2::Error) -> CoreError {
    CoreError::Transfer(e.to_string())
}

/// Upload `local` to `target` and return the number of bytes sent
pub fn send_file(local: &Path, target: &RemoteTarget, password: &Passphrase) -> Result<u64> {
    let data = fs::read(local).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CoreError::NotFound(local.to_path_buf()),
        _ => CoreError::Io(e),
    })?;
    let destination = target.destination_for(local);

    debug!(remote = %target, "connecting");
    let tcp = TcpStream::connect((target.host.as_str(), target.port))?;
    let mut session = Session::new().map_err(ssh_err)?;
    session.set_timeout(SESSION_TIMEOUT_MS);
    session.set_tcp_stream(tcp);
    session.handshake().map_err(ssh_err)?;

    session
        .userauth_password(&target.username, password.expose_secret())
        .map_err(ssh_err)?;
    if !session.authenticated() {
        return Err(CoreError::Transfer(format!("authentication rejected for {target}")));
    }

    let sftp = session.sftp().map_err(ssh_err)?;
    let mut remote = sftp.create(&destination).map_err(ssh_err)?;
    remote.write_all(&data)?;
    drop(remote);

    info!(
        remote = %target,
        remote_path = %destination.display(),
        bytes = data.len(),
        "uploaded file over SFTP"
    );
    Ok(data.len() as u64)
}
