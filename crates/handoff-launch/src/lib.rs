//! Availability checks and URL dispatch for mail clients.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use handoff_core::{Draft, MailClient, clients, log_debug};
use tokio::sync::oneshot;

/// Called once with whether the URL was opened.
pub type Completion = Box<dyn FnOnce(bool) + Send + 'static>;

/// Something that can tell whether a URL scheme has a handler and can open URLs.
pub trait UrlHandler: Send + Sync {
    fn can_open_url(&self, url: &str) -> bool;

    fn open_url(&self, url: &str) -> bool;

    fn open_url_with_completion(&self, url: &str, completion: Option<Completion>) {
        let opened = self.open_url(url);
        if let Some(completion) = completion {
            completion(opened);
        }
    }
}

#[async_trait]
pub trait UrlHandlerExt: UrlHandler {
    /// Awaits the completion of [`UrlHandler::open_url_with_completion`].
    /// A handler that never calls back resolves to `false`.
    async fn open_url_async(&self, url: &str) -> bool;
}

#[async_trait]
impl<T: UrlHandler + ?Sized> UrlHandlerExt for T {
    async fn open_url_async(&self, url: &str) -> bool {
        let (tx, rx) = oneshot::channel();
        self.open_url_with_completion(
            url,
            Some(Box::new(move |opened| {
                let _ = tx.send(opened);
            })),
        );
        rx.await.unwrap_or(false)
    }
}

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    assume_available: bool,
}

impl SystemOpener {
    /// `assume_available` answers availability where the host offers no way to ask.
    pub fn new(assume_available: bool) -> Self {
        Self { assume_available }
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new(true)
    }
}

impl UrlHandler for SystemOpener {
    fn can_open_url(&self, url: &str) -> bool {
        let Some((scheme, _)) = url.split_once(':') else {
            return false;
        };
        scheme_handler_registered(scheme).unwrap_or(self.assume_available)
    }

    fn open_url(&self, url: &str) -> bool {
        match open::that(url) {
            Ok(()) => true,
            Err(err) => {
                log_debug(&format!("open {} failed: {}", url, err));
                false
            }
        }
    }

    fn open_url_with_completion(&self, url: &str, completion: Option<Completion>) {
        let opener = self.clone();
        let url = url.to_string();
        std::thread::spawn(move || {
            let opened = opener.open_url(&url);
            if let Some(completion) = completion {
                completion(opened);
            }
        });
    }
}

#[cfg(target_os = "linux")]
fn scheme_handler_registered(scheme: &str) -> Option<bool> {
    use std::process::Command;

    let mime = format!("x-scheme-handler/{}", scheme);
    let output = Command::new("xdg-mime")
        .args(["query", "default", mime.as_str()])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

#[cfg(not(target_os = "linux"))]
fn scheme_handler_registered(_scheme: &str) -> Option<bool> {
    None
}

/// Records opened URLs instead of opening them.
#[derive(Debug)]
pub struct RecordingOpener {
    can_open_next: AtomicBool,
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn new(can_open: bool) -> Self {
        Self {
            can_open_next: AtomicBool::new(can_open),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn set_can_open_next(&self, can_open: bool) {
        self.can_open_next.store(can_open, Ordering::SeqCst);
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn last_opened(&self) -> Option<String> {
        self.opened
            .lock()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }
}

impl UrlHandler for RecordingOpener {
    fn can_open_url(&self, _url: &str) -> bool {
        self.can_open_next.load(Ordering::SeqCst)
    }

    fn open_url(&self, url: &str) -> bool {
        if let Ok(mut guard) = self.opened.lock() {
            guard.push(url.to_string());
        }
        true
    }
}

pub fn is_client_available<H: UrlHandler + ?Sized>(handler: &H, client: &MailClient) -> bool {
    handler.can_open_url(&client.availability_url())
}

/// Registered clients the handler reports as available, in registry order.
pub fn available_clients<H: UrlHandler + ?Sized>(handler: &H) -> Vec<&'static MailClient> {
    clients()
        .iter()
        .filter(|client| is_client_available(handler, client))
        .collect()
}

/// Launches the client without a message.
pub fn open_client<H: UrlHandler + ?Sized>(handler: &H, client: &MailClient) -> Result<bool> {
    let url = client.open_url()?;
    let opened = handler.open_url(&url);
    log_debug(&format!("open {} -> {}", url, opened));
    Ok(opened)
}

/// Launches the client in compose mode. `Ok(false)` means the host could not open it.
pub fn open_compose<H: UrlHandler + ?Sized>(
    handler: &H,
    client: &MailClient,
    draft: &Draft,
) -> Result<bool> {
    let url = client.compose_url(draft)?;
    let opened = handler.open_url(&url);
    log_debug(&format!("compose {} -> {}", url, opened));
    Ok(opened)
}

/// Async [`open_client`].
pub async fn open_client_async<H: UrlHandler + ?Sized>(
    handler: &H,
    client: &MailClient,
) -> Result<bool> {
    let url = client.open_url()?;
    let opened = handler.open_url_async(&url).await;
    log_debug(&format!("open {} -> {}", url, opened));
    Ok(opened)
}

pub async fn open_compose_async<H: UrlHandler + ?Sized>(
    handler: &H,
    client: &MailClient,
    draft: &Draft,
) -> Result<bool> {
    let url = client.compose_url(draft)?;
    let opened = handler.open_url_async(&url).await;
    log_debug(&format!("compose {} -> {}", url, opened));
    Ok(opened)
}
