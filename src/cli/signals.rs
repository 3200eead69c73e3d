//! Stop signals for the record command

use tokio::sync::mpsc;

/// Why the user asked the recording to end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRequest {
    /// Ctrl+C (SIGINT)
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl StopRequest {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Interrupt => "interrupt",
            Self::Terminate => "terminate",
        }
    }
}

/// Listens for OS stop signals while a recording runs.
///
/// FFmpeg runs in its own process group, so these signals reach only us
/// and the controller decides how FFmpeg is shut down.
pub struct StopSignals {
    receiver: mpsc::Receiver<StopRequest>,
}

impl StopSignals {
    /// Start listening for SIGINT and SIGTERM
    #[cfg(unix)]
    pub fn install() -> Result<Self, std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let (tx, rx) = mpsc::channel(4);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            while sigint.recv().await.is_some() {
                if tx_int.send(StopRequest::Interrupt).await.is_err() {
                    break;
                }
            }
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            while sigterm.recv().await.is_some() {
                if tx.send(StopRequest::Terminate).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self { receiver: rx })
    }

    /// Start listening for Ctrl+C
    #[cfg(not(unix))]
    pub fn install() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(4);
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send(StopRequest::Interrupt).await.is_err() {
                    break;
                }
            }
        });
        Ok(Self { receiver: rx })
    }

    /// Wait for the next stop request
    pub async fn recv(&mut self) -> Option<StopRequest> {
        self.receiver.recv().await
    }
}
