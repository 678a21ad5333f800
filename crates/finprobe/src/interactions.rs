//! Reusable interaction primitives.
//!
//! Every helper takes the locator plus a human-readable name, logs a
//! start/success/failure line, and converts low-level failures into the
//! uniform [`SuiteError`] shape carrying the operation kind, the semantic
//! name, and the original cause. Nothing is swallowed.

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{self, WaitOptions, OPTION_LIST_TIMEOUT_MS};
use tracing::{error, info};

fn wait_options(locator: &Locator) -> WaitOptions {
    WaitOptions::new()
        .with_timeout(locator.options().timeout.as_millis() as u64)
        .with_poll_interval(locator.options().poll_interval.as_millis() as u64)
}

/// Wait for actionability, then click.
pub async fn click(driver: &dyn Driver, locator: &Locator, name: &str) -> SuiteResult<()> {
    info!("CLICK: {name}");
    let ready = wait::poll_until(&wait_options(locator), || async move {
        Ok(driver.is_visible(locator.selector()).await?
            && driver.is_enabled(locator.selector()).await?)
    })
    .await;
    let result = match ready {
        Ok(()) => driver.click(locator.selector()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            info!("CLICK SUCCESS: {name}");
            Ok(())
        }
        Err(e) => {
            error!("CLICK FAILED: {name}: {e}");
            Err(SuiteError::ClickFailed {
                name: name.to_string(),
                cause: e.to_string(),
            })
        }
    }
}

/// Set the element's value, then re-read it and assert equality.
///
/// The double-check guards against silent truncation or transformation of
/// the typed value by the UI.
pub async fn fill(
    driver: &dyn Driver,
    locator: &Locator,
    value: &str,
    name: &str,
) -> SuiteResult<()> {
    info!("FILL: {name} -> \"{value}\"");
    let outcome = async {
        driver.fill(locator.selector(), value).await?;
        let actual = driver.input_value(locator.selector()).await?;
        if actual != value {
            return Err(SuiteError::mismatch(name, value, &actual));
        }
        info!("FILL CHECK: {name} VALUE = \"{actual}\"");
        Ok(())
    }
    .await;
    outcome.map_err(|e| {
        error!("FILL FAILED: {name}: {e}");
        SuiteError::FillFailed {
            name: name.to_string(),
            value: value.to_string(),
            cause: e.to_string(),
        }
    })
}

/// Assert visibility within the locator's bounded wait.
pub async fn verify_visible(driver: &dyn Driver, locator: &Locator, name: &str) -> SuiteResult<()> {
    info!("CHECK VISIBLE: {name}");
    wait::poll_until(&wait_options(locator), || async move {
        driver.is_visible(locator.selector()).await
    })
    .await
    .map_err(|e| {
        error!("NOT VISIBLE: {name}: {e}");
        SuiteError::NotVisible {
            name: name.to_string(),
        }
    })?;
    info!("VISIBLE OK: {name}");
    Ok(())
}

/// Assert the element is absent or hidden within the bounded wait.
pub async fn verify_not_visible(
    driver: &dyn Driver,
    locator: &Locator,
    name: &str,
) -> SuiteResult<()> {
    info!("CHECK NOT VISIBLE: {name}");
    wait::poll_until(&wait_options(locator), || async move {
        Ok(!driver.is_visible(locator.selector()).await?)
    })
    .await
    .map_err(|_| SuiteError::AssertionFailed {
        message: format!("{name} is still visible"),
    })?;
    info!("NOT VISIBLE OK: {name}");
    Ok(())
}

/// Assert the element's current value equals the expected string.
pub async fn verify_value(
    driver: &dyn Driver,
    locator: &Locator,
    expected: &str,
    name: &str,
) -> SuiteResult<()> {
    info!("CHECK INPUT VALUE: {name}");
    let actual = driver.input_value(locator.selector()).await?;
    if actual != expected {
        error!("INPUT VALUE CHECK FAILED: {name}");
        return Err(SuiteError::mismatch(name, expected, &actual));
    }
    info!("INPUT VALUE OK: {name}");
    Ok(())
}

/// Assert visibility and exact text equality.
pub async fn verify_text_content(
    driver: &dyn Driver,
    locator: &Locator,
    expected: &str,
    name: &str,
) -> SuiteResult<()> {
    verify_visible(driver, locator, name).await?;
    let actual = driver
        .text_content(locator.selector())
        .await?
        .unwrap_or_default();
    if actual.trim() != expected {
        error!("TEXT CHECK FAILED: {name}");
        return Err(SuiteError::mismatch(name, expected, actual.trim()));
    }
    info!("TEXT OK: {name}");
    Ok(())
}

/// Assert the element's native validity state is false.
pub async fn verify_invalid(driver: &dyn Driver, locator: &Locator, name: &str) -> SuiteResult<()> {
    info!("CHECK INVALID: {name}");
    let valid = driver.validity_valid(locator.selector()).await?;
    if valid {
        error!("VALIDATION CHECK FAILED: {name}");
        return Err(SuiteError::ValidationState {
            name: name.to_string(),
            message: "expected validity.valid to be false".to_string(),
        });
    }
    info!("INVALID OK: {name}");
    Ok(())
}

/// Assert a non-empty native validation message is present.
pub async fn verify_validation_message(
    driver: &dyn Driver,
    locator: &Locator,
    name: &str,
) -> SuiteResult<()> {
    info!("CHECK VALIDATION MESSAGE: {name}");
    let message = driver.validation_message(locator.selector()).await?;
    if message.is_empty() {
        error!("VALIDATION MESSAGE CHECK FAILED: {name}");
        return Err(SuiteError::ValidationState {
            name: name.to_string(),
            message: "expected a non-empty validation message".to_string(),
        });
    }
    info!("VALIDATION MESSAGE OK: {name}");
    Ok(())
}

/// Select an option by value, waiting first for the control to be populated.
///
/// Option lists are populated asynchronously after initial render; selecting
/// before population is a classic source of flakiness. The wait therefore has
/// two phases: the control must be visible, enabled, and hold more than a
/// placeholder option, and the target value itself must be present.
pub async fn select_option_by_value(
    driver: &dyn Driver,
    locator: &Locator,
    value: &str,
    name: &str,
) -> SuiteResult<()> {
    info!("SELECT: {name} -> \"{value}\"");
    let opts = WaitOptions::new()
        .with_timeout(OPTION_LIST_TIMEOUT_MS)
        .with_poll_interval(locator.options().poll_interval.as_millis() as u64);

    let outcome = async {
        wait::poll_until(&opts, || async move {
            Ok(driver.is_visible(locator.selector()).await?
                && driver.is_enabled(locator.selector()).await?
                && driver.option_values(locator.selector()).await?.len() > 1)
        })
        .await?;
        wait::poll_until(&opts, || async move {
            Ok(driver
                .option_values(locator.selector())
                .await?
                .iter()
                .any(|v| v == value))
        })
        .await?;
        driver.select_option(locator.selector(), value).await?;
        let actual = driver.input_value(locator.selector()).await?;
        if actual != value {
            return Err(SuiteError::mismatch(name, value, &actual));
        }
        Ok(())
    }
    .await;
    match outcome {
        Ok(()) => {
            info!("SELECT SUCCESS: {name}");
            Ok(())
        }
        Err(e) => {
            error!("SELECT FAILED: {name}: {e}");
            Err(SuiteError::SelectFailed {
                name: name.to_string(),
                cause: e.to_string(),
            })
        }
    }
}
