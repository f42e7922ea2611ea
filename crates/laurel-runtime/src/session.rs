//! Scoped driver sessions.

use crate::driver::PageDriver;
use crate::pipeline::{PageRange, Pipeline, PipelineError, RunSummary};
use laurel_audit::AuditLog;
use laurel_core::{Credentials, PagesConfig};

/// Log in, run the pipeline over the configured pages, and close the session.
///
/// `close` is called whether the run succeeded or not. When both the run and
/// `close` fail, the run error is returned and the close error is logged.
pub async fn run_session<D: PageDriver + ?Sized>(
    driver: &mut D,
    credentials: &Credentials,
    pipeline: &Pipeline,
    log: &mut AuditLog,
    pages: &PagesConfig,
) -> Result<RunSummary, PipelineError> {
    let outcome = drive(driver, credentials, pipeline, log, pages).await;
    let closed = driver.close().await;

    match (outcome, closed) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            tracing::warn!(error = %close_err, "Failed to close driver session after a failed run");
            Err(e)
        }
    }
}

async fn drive<D: PageDriver + ?Sized>(
    driver: &mut D,
    credentials: &Credentials,
    pipeline: &Pipeline,
    log: &mut AuditLog,
    pages: &PagesConfig,
) -> Result<RunSummary, PipelineError> {
    driver.login(credentials).await?;
    tracing::info!(login = %credentials.login, "Driver session opened");

    let range = PageRange::resolve(pages, driver).await?;
    pipeline.run(driver, log, range).await
}
