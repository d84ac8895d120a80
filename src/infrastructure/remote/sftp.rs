//! SFTP Session Provider
//!
//! Implements the remote session port over SSH using `ssh2` (libssh2).
//! One TCP connection, one SSH session and one SFTP channel per `connect`.

use std::fmt;
use std::io::{self, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ssh2::{CheckResult, ErrorCode, FileStat, KnownHostFileKind, Session, Sftp};
use tracing::{debug, warn};

use crate::domain::entities::RemoteFile;
use crate::domain::ports::{
    ConnectionError, EntryKind, RemoteSession, SessionProvider, TransportError, TransportResult,
    TransportStep,
};

/// SFTP status code for "no such file" (`SSH_FX_NO_SUCH_FILE`)
const SFTP_NO_SUCH_FILE: i32 = 2;

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

/// How the session authenticates
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Private key file, optionally encrypted
    PrivateKey {
        path: PathBuf,
        passphrase: Option<String>,
    },
    /// Plain password
    Password(String),
    /// Identities offered by the running ssh-agent
    Agent,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateKey { path, passphrase } => f
                .debug_struct("PrivateKey")
                .field("path", path)
                .field("passphrase", &passphrase.as_ref().map(|_| "<redacted>"))
                .finish(),
            Self::Password(_) => f.write_str("Password(<redacted>)"),
            Self::Agent => f.write_str("Agent"),
        }
    }
}

/// Everything needed to open a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub credentials: Credentials,
    /// OpenSSH known_hosts file to verify the server key against
    pub known_hosts_file: Option<PathBuf>,
    /// TCP connect and blocking-call timeout
    pub timeout: Option<Duration>,
}

/// Opens SFTP sessions to one host
#[derive(Debug, Clone)]
pub struct SftpSessionProvider {
    options: ConnectOptions,
}

impl SftpSessionProvider {
    pub fn new(options: ConnectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    fn error(&self, reason: impl fmt::Display) -> ConnectionError {
        ConnectionError {
            host: self.options.host.clone(),
            port: self.options.port,
            reason: reason.to_string(),
        }
    }

    fn open_tcp(&self) -> io::Result<TcpStream> {
        let addr = (self.options.host.as_str(), self.options.port);
        let Some(timeout) = self.options.timeout else {
            return TcpStream::connect(addr);
        };

        let mut last_err = None;
        for socket_addr in addr.to_socket_addrs()? {
            match TcpStream::connect_timeout(&socket_addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
        }))
    }

    fn verify_host_key(&self, session: &Session, known_hosts: &Path) -> Result<(), ConnectionError> {
        let mut hosts = session.known_hosts().map_err(|e| self.error(e))?;
        hosts
            .read_file(known_hosts, KnownHostFileKind::OpenSSH)
            .map_err(|e| self.error(format!("cannot read {}: {}", known_hosts.display(), e)))?;

        let (key, _) = session
            .host_key()
            .ok_or_else(|| self.error("server sent no host key"))?;

        match hosts.check_port(&self.options.host, self.options.port, key) {
            CheckResult::Match => Ok(()),
            CheckResult::NotFound => Err(self.error(format!(
                "host key not found in {}",
                known_hosts.display()
            ))),
            CheckResult::Mismatch => Err(self.error("host key mismatch")),
            CheckResult::Failure => Err(self.error("host key check failed")),
        }
    }

    fn authenticate(&self, session: &Session) -> Result<(), ConnectionError> {
        let username = self.options.username.as_str();
        let result = match &self.options.credentials {
            Credentials::PrivateKey { path, passphrase } => {
                session.userauth_pubkey_file(username, None, path, passphrase.as_deref())
            }
            Credentials::Password(password) => session.userauth_password(username, password),
            Credentials::Agent => session.userauth_agent(username),
        };
        result.map_err(|e| self.error(format!("authentication failed: {}", e)))?;

        if !session.authenticated() {
            return Err(self.error("authentication rejected"));
        }
        Ok(())
    }
}

impl SessionProvider for SftpSessionProvider {
    fn destination(&self) -> String {
        format!(
            "{}@{}:{}",
            self.options.username, self.options.host, self.options.port
        )
    }

    fn connect(&self) -> Result<Box<dyn RemoteSession>, ConnectionError> {
        debug!(destination = %self.destination(), "opening ssh session");

        let tcp = self.open_tcp().map_err(|e| self.error(e))?;
        let mut session = Session::new().map_err(|e| self.error(e))?;
        if let Some(timeout) = self.options.timeout {
            session.set_timeout(u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX));
        }
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| self.error(format!("handshake failed: {}", e)))?;

        match &self.options.known_hosts_file {
            Some(known_hosts) => self.verify_host_key(&session, known_hosts)?,
            None => debug!("no known_hosts file configured; host key not verified"),
        }

        self.authenticate(&session)?;
        let sftp = session
            .sftp()
            .map_err(|e| self.error(format!("sftp subsystem unavailable: {}", e)))?;

        Ok(Box::new(SftpSession {
            session,
            sftp: Some(sftp),
            closed: false,
        }))
    }
}

/// An open SFTP channel and the SSH session carrying it
struct SftpSession {
    session: Session,
    sftp: Option<Sftp>,
    closed: bool,
}

fn transport(step: TransportStep, path: &str, err: impl fmt::Display) -> TransportError {
    TransportError::new(step, path, err.to_string())
}

fn is_not_found(err: &ssh2::Error) -> bool {
    err.code() == ErrorCode::SFTP(SFTP_NO_SUCH_FILE)
}

/// Directories are never revisions, whatever their name
fn listing_entry(path: &Path, stat: &FileStat) -> Option<RemoteFile> {
    if stat.file_type().is_dir() {
        return None;
    }
    let name = path.file_name()?.to_string_lossy().into_owned();
    Some(RemoteFile::from_unix_mtime(name, stat.mtime))
}

impl SftpSession {
    fn sftp(&self, step: TransportStep, path: &str) -> TransportResult<&Sftp> {
        self.sftp
            .as_ref()
            .ok_or_else(|| transport(step, path, "sftp channel already closed"))
    }

    fn shutdown(&mut self) -> Result<(), ssh2::Error> {
        // The SFTP channel must go before the session it runs on
        self.sftp.take();
        self.closed = true;
        self.session.disconnect(None, "done", None)
    }
}

impl RemoteSession for SftpSession {
    fn read_dir(&mut self, dir: &str) -> TransportResult<Vec<RemoteFile>> {
        debug!(dir, "readdir");
        let entries = self
            .sftp(TransportStep::List, dir)?
            .readdir(Path::new(dir))
            .map_err(|e| transport(TransportStep::List, dir, e))?;

        Ok(entries
            .into_iter()
            .filter_map(|(path, stat)| listing_entry(&path, &stat))
            .collect())
    }

    fn entry_kind(&mut self, path: &str) -> TransportResult<Option<EntryKind>> {
        debug!(path, "lstat");
        match self.sftp(TransportStep::Stat, path)?.lstat(Path::new(path)) {
            Ok(stat) => {
                let file_type = stat.file_type();
                let kind = if file_type.is_symlink() {
                    EntryKind::Symlink
                } else if file_type.is_dir() {
                    EntryKind::Directory
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                Ok(Some(kind))
            }
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(transport(TransportStep::Stat, path, e)),
        }
    }

    fn read_link(&mut self, path: &str) -> TransportResult<String> {
        debug!(path, "readlink");
        let target = self
            .sftp(TransportStep::ReadLink, path)?
            .readlink(Path::new(path))
            .map_err(|e| transport(TransportStep::ReadLink, path, e))?;
        Ok(target.to_string_lossy().into_owned())
    }

    fn unlink(&mut self, path: &str) -> TransportResult<()> {
        debug!(path, "unlink");
        self.sftp(TransportStep::Unlink, path)?
            .unlink(Path::new(path))
            .map_err(|e| transport(TransportStep::Unlink, path, e))
    }

    fn symlink(&mut self, target: &str, link: &str) -> TransportResult<()> {
        debug!(target, link, "symlink");
        // ssh2 takes (existing path, link location)
        self.sftp(TransportStep::Symlink, link)?
            .symlink(Path::new(target), Path::new(link))
            .map_err(|e| transport(TransportStep::Symlink, link, e))
    }

    fn write_file(&mut self, path: &str, bytes: &[u8]) -> TransportResult<()> {
        debug!(path, bytes = bytes.len(), "write");
        let mut file = self
            .sftp(TransportStep::Write, path)?
            .create(Path::new(path))
            .map_err(|e| transport(TransportStep::Write, path, e))?;

        file.write_all(bytes)
            .and_then(|()| file.flush())
            .map_err(|e| transport(TransportStep::Write, path, e))?;
        file.close()
            .map_err(|e| transport(TransportStep::Write, path, e))
    }

    fn close(mut self: Box<Self>) -> TransportResult<()> {
        self.shutdown()
            .map_err(|e| transport(TransportStep::Close, "", e))
    }
}

impl Drop for SftpSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.shutdown() {
            warn!(error = %e, "failed to disconnect abandoned ssh session");
        }
    }
}
