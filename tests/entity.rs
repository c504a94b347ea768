//! Entity refresh and user-intent tests against a mock soundbar

use samsung_soundbar::{PowerState, SoundbarEntity, SoundbarError, StatusSnapshot};
use std::time::Duration;

mod common;
use common::{field_response, MockSoundbar, CANNED_STATUS};

fn entity(mock: &MockSoundbar) -> SoundbarEntity {
    SoundbarEntity::new(reqwest::Client::new(), &mock.config()).unwrap()
}

fn status(power: &str, volume: &str, mute: &str) -> String {
    format!("<UIC><response><power>{power}</power><volume>{volume}</volume><mute>{mute}</mute></response></UIC>")
}

#[tokio::test]
async fn test_refresh_derives_snapshot() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(CANNED_STATUS).await;

    let mut soundbar = entity(&mock);
    let snapshot = soundbar.refresh().await.unwrap();

    assert_eq!(snapshot.state, PowerState::On);
    assert_eq!(snapshot.volume, 0.37);
    assert!(!snapshot.muted);
    assert_eq!(soundbar.snapshot(), Some(&snapshot));
    assert!(soundbar.is_on());
    assert_eq!(soundbar.volume_level(), Some(0.37));
    assert!(!soundbar.is_volume_muted());
}

#[tokio::test]
async fn test_refresh_is_idempotent() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(CANNED_STATUS).await;

    let mut soundbar = entity(&mock);
    let first = soundbar.refresh().await.unwrap();
    let second = soundbar.refresh().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(mock.received_commands().await.len(), 6);
}

#[tokio::test]
async fn test_refresh_power_off_and_muted() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(&status("off", "0", "on")).await;

    let mut soundbar = entity(&mock);
    soundbar.refresh().await.unwrap();

    assert_eq!(soundbar.state(), PowerState::Off);
    assert_eq!(soundbar.volume_level(), Some(0.0));
    assert!(soundbar.is_volume_muted());
}

#[tokio::test]
async fn test_refresh_full_volume() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(&status("on", "100", "off")).await;

    let mut soundbar = entity(&mock);
    assert_eq!(soundbar.refresh().await.unwrap().volume, 1.0);
}

#[tokio::test]
async fn test_refresh_missing_mute_fails() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all("<UIC><response><power>on</power><volume>37</volume></response></UIC>")
        .await;

    let mut soundbar = entity(&mock);
    let result = soundbar.refresh().await;

    assert!(matches!(result, Err(SoundbarError::MissingField("mute"))));
    assert!(soundbar.snapshot().is_none());
    assert!(!soundbar.is_volume_muted());
}

#[tokio::test]
async fn test_timeout_keeps_previous_snapshot() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(CANNED_STATUS).await;

    let mut soundbar = entity(&mock);
    let before = soundbar.refresh().await.unwrap();

    mock.server.reset().await;
    mock.respond_slowly(&status("off", "80", "on"), Duration::from_secs(2))
        .await;

    let result = soundbar.refresh().await;

    assert!(matches!(result, Err(SoundbarError::Timeout)));
    assert_eq!(soundbar.snapshot(), Some(&before));
}

#[tokio::test]
async fn test_http_error_keeps_previous_snapshot() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(CANNED_STATUS).await;

    let mut soundbar = entity(&mock);
    let before: StatusSnapshot = soundbar.refresh().await.unwrap();

    mock.server.reset().await;
    mock.respond_with_status(500).await;

    assert!(soundbar.refresh().await.unwrap_err().is_transport());
    assert_eq!(soundbar.snapshot(), Some(&before));
}

#[tokio::test]
async fn test_set_muted_sends_wire_values() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(&field_response("mute", "on")).await;

    let soundbar = entity(&mock);
    soundbar.set_muted(true).await.unwrap();
    soundbar.set_muted(false).await.unwrap();

    assert_eq!(
        mock.received_commands().await,
        vec![
            r#"<name>SetMute</name><p type="str" name="mute" val="on"/>"#,
            r#"<name>SetMute</name><p type="str" name="mute" val="off"/>"#,
        ]
    );
    // Mutations never touch the cache
    assert!(soundbar.snapshot().is_none());
}

#[tokio::test]
async fn test_set_volume_boundaries() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(&field_response("volume", "0")).await;

    let soundbar = entity(&mock);
    soundbar.set_volume(1.0).await.unwrap();
    soundbar.set_volume(0.0).await.unwrap();
    soundbar.set_volume(0.42).await.unwrap();

    assert_eq!(
        mock.received_commands().await,
        vec![
            r#"<name>SetVolume</name><p type="dec" name="volume" val="100"/>"#,
            r#"<name>SetVolume</name><p type="dec" name="volume" val="0"/>"#,
            r#"<name>SetVolume</name><p type="dec" name="volume" val="42"/>"#,
        ]
    );
}

#[tokio::test]
async fn test_set_volume_out_of_range_sends_nothing() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_all(&field_response("volume", "0")).await;

    let soundbar = entity(&mock);
    let result = soundbar.set_volume(1.2).await;

    assert!(matches!(result, Err(SoundbarError::InvalidVolume(v)) if v == 1.2));
    assert!(mock.received_commands().await.is_empty());
}

#[tokio::test]
async fn test_mutation_failure_is_reported() {
    let mock = MockSoundbar::start().await;
    mock.respond_with_status(500).await;

    let soundbar = entity(&mock);
    assert!(soundbar.set_muted(true).await.unwrap_err().is_transport());
    assert!(soundbar.set_volume(0.5).await.unwrap_err().is_transport());
}

#[tokio::test]
async fn test_volume_steps_from_cached_level() {
    let mock = MockSoundbar::start().await;
    mock.respond_to_command("<name>GetPowerStatus</name>", &field_response("power", "on"))
        .await;
    mock.respond_to_command("<name>GetVolume</name>", &field_response("volume", "100"))
        .await;
    mock.respond_to_command("<name>GetMute</name>", &field_response("mute", "off"))
        .await;
    mock.respond_to_all(&field_response("volume", "99")).await;

    let mut soundbar = entity(&mock);
    soundbar.refresh().await.unwrap();
    soundbar.volume_up().await.unwrap();
    soundbar.volume_down().await.unwrap();

    let commands = mock.received_commands().await;
    assert_eq!(
        &commands[3..],
        &[
            r#"<name>SetVolume</name><p type="dec" name="volume" val="100"/>"#,
            r#"<name>SetVolume</name><p type="dec" name="volume" val="99"/>"#,
        ]
    );
}
