use std::time::Duration;

use captionify::application::ports::TranscriptionError;
use captionify::application::RetryPolicy;

#[test]
fn given_default_policy_then_three_attempts_two_second_delay() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.delay, Duration::from_secs(2));
}

#[test]
fn given_three_attempts_when_checking_retries_then_only_first_two_allow_another() {
    let policy = RetryPolicy::default();

    assert!(policy.allows_retry_after(1));
    assert!(policy.allows_retry_after(2));
    assert!(!policy.allows_retry_after(3));
}

#[test]
fn given_zero_attempts_when_constructing_then_clamped_to_one() {
    let policy = RetryPolicy::new(0, Duration::from_millis(10));

    assert_eq!(policy.max_attempts, 1);
    assert!(!policy.allows_retry_after(1));
}

#[test]
fn given_error_classes_then_only_transport_and_api_status_are_retryable() {
    assert!(TranscriptionError::Transport("reset".to_string()).is_retryable());
    assert!(TranscriptionError::ApiStatus {
        status: 503,
        body: "unavailable".to_string()
    }
    .is_retryable());

    assert!(!TranscriptionError::JobFailed("bad audio".to_string()).is_retryable());
    assert!(!TranscriptionError::InvalidResponse("not json".to_string()).is_retryable());
    assert!(!TranscriptionError::MissingCredential("key".to_string()).is_retryable());
}
