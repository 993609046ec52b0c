//! Background poller for the remote command service
//!
//! Runs on its own thread with blocking I/O. Every interval it reads the
//! service's pending-command slot and forwards whatever it finds into the
//! command channel. Failures are swallowed; the next interval simply tries
//! again.

use std::{
    path::PathBuf,
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use parking_lot::{Condvar, Mutex};
use reqwest::{blocking::Client, Certificate, Url};
use tracing::{debug, info, warn};

use super::command_channel::CommandProducer;
use crate::{
    api::auth::AUTH_HEADER,
    error::{ConfigError, WatchError},
    state::{Command, CommandStatus},
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(500);

/// Connection parameters for the remote command service
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub status_url: Url,
    pub auth_token: Option<String>,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    /// Extra PEM root certificate to trust
    pub ca_cert: Option<PathBuf>,
}

impl WatcherConfig {
    /// Build a configuration for the service at `server_url` with default timings
    pub fn new(server_url: &str, auth_token: Option<String>) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidServerUrl {
            url: server_url.to_string(),
            reason,
        };

        let base = server_url.trim().trim_end_matches('/');
        let status_url = Url::parse(&format!("{}/status", base))
            .map_err(|e| invalid(e.to_string()))?;
        if !matches!(status_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", status_url.scheme())));
        }

        Ok(Self {
            status_url,
            auth_token: auth_token.filter(|token| !token.is_empty()),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            ca_cert: None,
        })
    }
}

/// Where the watcher reads pending commands from
pub trait CommandSource {
    fn fetch(&self) -> Result<Option<Command>, WatchError>;
}

/// Reads `GET /status` from the remote service
#[derive(Debug)]
pub struct HttpCommandSource {
    client: Client,
    status_url: Url,
    auth_token: Option<String>,
}

impl HttpCommandSource {
    pub fn new(config: &WatcherConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout)
            .user_agent(concat!("timerbar/", env!("CARGO_PKG_VERSION")));

        if let Some(path) = &config.ca_cert {
            let pem = std::fs::read(path).map_err(|source| ConfigError::ReadCaCert {
                path: path.clone(),
                source,
            })?;
            let certificate =
                Certificate::from_pem(&pem).map_err(|source| ConfigError::InvalidCaCert {
                    path: path.clone(),
                    source,
                })?;
            builder = builder.add_root_certificate(certificate);
        }

        let client = builder.build().map_err(ConfigError::HttpClient)?;
        Ok(Self {
            client,
            status_url: config.status_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }
}

impl CommandSource for HttpCommandSource {
    fn fetch(&self) -> Result<Option<Command>, WatchError> {
        let mut request = self.client.get(self.status_url.clone());
        if let Some(token) = &self.auth_token {
            request = request.header(AUTH_HEADER, token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Status(status.as_u16()));
        }

        let body: CommandStatus = response.json()?;
        Ok(body.last_command)
    }
}

/// Lifecycle of the polling thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherPhase {
    Running,
    Stopping,
    Stopped,
}

#[derive(Debug)]
struct Shared {
    phase: Mutex<WatcherPhase>,
    wake: Condvar,
}

/// Handle to the polling thread. Dropping it stops and joins the thread.
#[derive(Debug)]
pub struct RemoteWatcher {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl RemoteWatcher {
    /// Start polling `source` every `interval`
    pub fn spawn<S>(
        source: S,
        producer: CommandProducer,
        interval: Duration,
    ) -> std::io::Result<Self>
    where
        S: CommandSource + Send + 'static,
    {
        let shared = Arc::new(Shared {
            phase: Mutex::new(WatcherPhase::Running),
            wake: Condvar::new(),
        });

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("timerbar-watcher".to_string())
            .spawn(move || poll_loop(source, producer, interval, thread_shared))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    pub fn phase(&self) -> WatcherPhase {
        *self.shared.phase.lock()
    }

    /// Ask the thread to exit. Returns immediately.
    pub fn stop(&self) {
        let mut phase = self.shared.phase.lock();
        if *phase == WatcherPhase::Running {
            *phase = WatcherPhase::Stopping;
        }
        self.shared.wake.notify_all();
    }

    /// Stop the thread and wait for it to exit
    pub fn shutdown(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Remote watcher thread panicked");
                *self.shared.phase.lock() = WatcherPhase::Stopped;
            }
        }
    }
}

impl Drop for RemoteWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn poll_loop<S: CommandSource>(
    source: S,
    producer: CommandProducer,
    interval: Duration,
    shared: Arc<Shared>,
) {
    info!("Remote watcher started, polling every {}ms", interval.as_millis());

    loop {
        if *shared.phase.lock() != WatcherPhase::Running {
            break;
        }

        match source.fetch() {
            Ok(Some(command)) => {
                debug!("Remote command received: {}", command);
                producer.push(command);
            }
            Ok(None) => {}
            Err(e) => debug!("Remote poll failed: {}", e),
        }

        let deadline = Instant::now() + interval;
        let mut phase = shared.phase.lock();
        while *phase == WatcherPhase::Running {
            if shared.wake.wait_until(&mut phase, deadline).timed_out() {
                break;
            }
        }
        if *phase != WatcherPhase::Running {
            break;
        }
    }

    *shared.phase.lock() = WatcherPhase::Stopped;
    info!("Remote watcher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::command_channel::{command_channel, CommandConsumer};
    use std::{
        collections::VecDeque,
        sync::atomic::{AtomicUsize, Ordering},
    };

    /// Replays scripted poll results, then reports an empty slot
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Option<Command>, WatchError>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Option<Command>, WatchError>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = Self {
                script: Mutex::new(script.into()),
                calls: Arc::clone(&calls),
            };
            (source, calls)
        }
    }

    impl CommandSource for ScriptedSource {
        fn fetch(&self) -> Result<Option<Command>, WatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script.lock().pop_front().unwrap_or(Ok(None))
        }
    }

    fn wait_for_commands(consumer: &CommandConsumer, count: usize) -> Vec<Command> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut received = Vec::new();
        while received.len() < count && Instant::now() < deadline {
            received.extend(consumer.drain_all());
            thread::sleep(Duration::from_millis(5));
        }
        received
    }

    #[test]
    fn forwards_commands_and_swallows_failures() {
        let (source, calls) = ScriptedSource::new(vec![
            Err(WatchError::Status(503)),
            Ok(Some(Command::Toggle)),
            Ok(None),
            Err(WatchError::Status(403)),
            Ok(Some(Command::Reset)),
        ]);
        let (producer, consumer) = command_channel(8);
        let mut watcher = RemoteWatcher::spawn(source, producer, Duration::from_millis(5)).unwrap();

        let received = wait_for_commands(&consumer, 2);
        assert_eq!(received, vec![Command::Toggle, Command::Reset]);
        assert!(calls.load(Ordering::SeqCst) >= 5);
        assert_eq!(watcher.phase(), WatcherPhase::Running);

        watcher.shutdown();
        assert_eq!(watcher.phase(), WatcherPhase::Stopped);
    }

    #[test]
    fn stop_interrupts_the_interval_wait() {
        let (source, calls) = ScriptedSource::new(Vec::new());
        let (producer, _consumer) = command_channel(8);
        let mut watcher = RemoteWatcher::spawn(source, producer, Duration::from_secs(60)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }

        let started = Instant::now();
        watcher.shutdown();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(watcher.phase(), WatcherPhase::Stopped);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_before_first_poll_is_respected() {
        let (source, _calls) = ScriptedSource::new(Vec::new());
        let (producer, consumer) = command_channel(8);
        let mut watcher = RemoteWatcher::spawn(source, producer, Duration::from_millis(1)).unwrap();
        watcher.stop();
        watcher.shutdown();
        assert_eq!(watcher.phase(), WatcherPhase::Stopped);
        assert!(consumer.drain_all().is_empty());
    }

    #[test]
    fn config_builds_status_url() {
        let config = WatcherConfig::new("http://10.0.0.5:5000/", Some("tok".to_string())).unwrap();
        assert_eq!(config.status_url.as_str(), "http://10.0.0.5:5000/status");
        assert_eq!(config.auth_token.as_deref(), Some("tok"));
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn config_rejects_bad_urls() {
        assert!(matches!(
            WatcherConfig::new("not a url", None),
            Err(ConfigError::InvalidServerUrl { .. })
        ));
        assert!(matches!(
            WatcherConfig::new("ftp://example.com", None),
            Err(ConfigError::InvalidServerUrl { .. })
        ));
    }

    #[test]
    fn unreachable_service_is_a_transport_error() {
        let mut config = WatcherConfig::new("http://127.0.0.1:9", None).unwrap();
        config.request_timeout = Duration::from_millis(200);
        let source = HttpCommandSource::new(&config).unwrap();
        assert!(matches!(source.fetch(), Err(WatchError::Transport(_))));
    }

    #[test]
    fn missing_ca_cert_is_a_config_error() {
        let mut config = WatcherConfig::new("https://example.com", None).unwrap();
        config.ca_cert = Some(PathBuf::from("/nonexistent/timerbar-ca.pem"));
        assert!(matches!(
            HttpCommandSource::new(&config),
            Err(ConfigError::ReadCaCert { .. })
        ));
    }
}
