mod common;

use common::{capture_console, wait_for};
use interject::{
    run_listener, CancellationSignal, ConfigError, GuessingGame, InteractiveSession, Listener,
    ListenerConfig, ListenerEnd, ListenerError, SessionEnd,
};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration};

const ACCEPT_POLL: Duration = Duration::from_millis(100);
const READ_POLL: Duration = Duration::from_millis(50);

fn local_config(port: u16) -> ListenerConfig {
    ListenerConfig::new("127.0.0.1", port).with_polls(ACCEPT_POLL, READ_POLL)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_message_then_quit_stops_listener() -> anyhow::Result<()> {
    let (console, buf) = capture_console();
    let cancel = CancellationSignal::new();
    let listener = Listener::bind(local_config(0), console, cancel.clone()).await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(listener.serve());

    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(b"hello\n").await?;
    assert!(wait_for(Duration::from_secs(2), || buf.contents().contains("[HACKER] hello")).await);

    stream.write_all(b"quit\n").await?;
    // Handler notices on the next read, listener on the next loop check.
    let served = timeout(ACCEPT_POLL * 2 + READ_POLL * 2, server).await??;
    assert!(served.is_ok());
    assert!(cancel.is_set());

    let out = buf.contents();
    assert!(out.contains(&format!("(Hacker message server listening on {})", addr)));
    assert_eq!(out.matches("[HACKER] hello").count(), 1);
    assert!(out.contains("(hacker requested end of game)"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connections_are_served_one_at_a_time() -> anyhow::Result<()> {
    let (console, buf) = capture_console();
    let cancel = CancellationSignal::new();
    let listener = Listener::bind(local_config(0), console, cancel.clone()).await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(listener.serve());

    let mut first = TcpStream::connect(addr).await?;
    first.write_all(b"from first\n").await?;
    assert!(wait_for(Duration::from_secs(2), || buf.contents().contains("from first")).await);

    // Queued by the kernel but not read until the first peer leaves.
    let mut second = TcpStream::connect(addr).await?;
    second.write_all(b"from second\n").await?;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!buf.contents().contains("from second"));

    drop(first);
    let second_shown = || buf.contents().contains("[HACKER] from second");
    assert!(wait_for(Duration::from_secs(2), second_shown).await);

    let out = buf.contents();
    assert_eq!(out.matches("(Hacker connected from").count(), 2);
    let disconnect = out.find("(hacker disconnected)").unwrap();
    assert!(disconnect < out.find("from second").unwrap());

    cancel.set();
    drop(second);
    timeout(Duration::from_secs(2), server).await???;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signal_stops_idle_listener() -> anyhow::Result<()> {
    let (console, _buf) = capture_console();
    let cancel = CancellationSignal::new();
    let server = tokio::spawn(run_listener(local_config(0), console, cancel.clone()));

    tokio::time::sleep(Duration::from_millis(150)).await;
    cancel.set();
    let end = timeout(ACCEPT_POLL * 3, server).await??;
    assert_eq!(end, ListenerEnd::Stopped);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signal_closes_open_connection() -> anyhow::Result<()> {
    let (console, buf) = capture_console();
    let cancel = CancellationSignal::new();
    let listener = Listener::bind(local_config(0), console, cancel.clone()).await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(listener.serve());

    let _stream = TcpStream::connect(addr).await?;
    let connected = || buf.contents().contains("(Hacker connected from");
    assert!(wait_for(Duration::from_secs(2), connected).await);

    cancel.set();
    timeout(READ_POLL * 2 + ACCEPT_POLL * 2, server).await???;
    assert!(buf.contents().contains("(hacker disconnected)"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bind_failure_disables_messaging_only() -> anyhow::Result<()> {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = occupied.local_addr()?.port();

    let (console, buf) = capture_console();
    let cancel = CancellationSignal::new();
    let end = timeout(
        Duration::from_secs(2),
        run_listener(local_config(port), console.clone(), cancel.clone()),
    )
    .await?;
    assert_eq!(end, ListenerEnd::Disabled);
    assert!(!cancel.is_set());

    let out = buf.contents();
    assert_eq!(
        out.matches(&format!("ERROR: Could not bind to 127.0.0.1:{}", port)).count(),
        1
    );
    assert!(out.contains("Hacker messaging disabled."));

    // The game still plays to the end.
    let game = GuessingGame::with_secret(30)?;
    let input = std::io::Cursor::new("50\n20\n30\n");
    let session_end = tokio::task::spawn_blocking(move || {
        InteractiveSession::new(input, game, console, cancel).run()
    })
    .await?;
    assert_eq!(session_end, SessionEnd::Won);
    assert!(buf.contents().contains("Correct! The number was 30. Attempts: 3"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_host_is_rejected() {
    let (console, buf) = capture_console();
    let cancel = CancellationSignal::new();
    let config = ListenerConfig::new("not-an-ip.invalid", 0);

    match Listener::bind(config.clone(), console.clone(), cancel.clone()).await {
        Err(ListenerError::Config(ConfigError::InvalidHost(host))) => {
            assert_eq!(host, "not-an-ip.invalid")
        }
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("bind should fail"),
    }

    assert_eq!(run_listener(config, console, cancel).await, ListenerEnd::Disabled);
    assert!(buf.contents().contains("Hacker messaging disabled."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_hostname_is_resolved() -> anyhow::Result<()> {
    let config = ListenerConfig::new("localhost", 0).with_polls(ACCEPT_POLL, READ_POLL);
    assert!(config.resolve().await?.ip().is_loopback());

    let (console, buf) = capture_console();
    let cancel = CancellationSignal::new();
    let listener = Listener::bind(config, console, cancel.clone()).await?;
    let addr = listener.local_addr()?;
    assert!(addr.ip().is_loopback());
    let server = tokio::spawn(listener.serve());

    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(b"via name\n").await?;
    let shown = || buf.contents().contains("[HACKER] via name");
    assert!(wait_for(Duration::from_secs(2), shown).await);

    cancel.set();
    drop(stream);
    timeout(Duration::from_secs(2), server).await???;
    Ok(())
}

#[tokio::test]
async fn test_config_defaults() -> anyhow::Result<()> {
    let config = ListenerConfig::default();
    assert_eq!(config.to_string(), "0.0.0.0:9999");
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.resolve().await?.port(), 9999);

    let zero = config.with_polls(Duration::ZERO, READ_POLL);
    assert_eq!(zero.validate(), Err(ConfigError::ZeroPoll));
    assert_eq!(zero.resolve().await, Err(ConfigError::ZeroPoll));
    Ok(())
}
