//! Periodic note tools.

use super::args::{Period, PeriodicArgs, PeriodicContentArgs, PeriodicPatchArgs};
use super::router::ToolRouter;
use super::{ToolResponse, encode_component};
use crate::dispatch::{DispatchPayload, DispatchRequest};
use crate::endpoint::ports::EndpointStoreRepository;
use chrono::NaiveDate;
use mockable::Clock;
use std::fmt;

const MARKDOWN: &str = "text/markdown";

/// Builds `/periodic/<period>/`, or the dated form when `date` is given.
fn periodic_path(period: Period, date: Option<&str>) -> Result<String, String> {
    match date {
        None => Ok(format!("/periodic/{period}/")),
        Some(raw) => {
            let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|err| format!("Invalid date '{raw}': expected YYYY-MM-DD ({err})"))?;
            Ok(format!("/periodic/{period}/{}/", parsed.format("%Y/%m/%d")))
        }
    }
}

fn for_date(date: Option<&str>) -> String {
    date.map(|day| format!(" for {day}")).unwrap_or_default()
}

fn failed(verb: &str, period: Period, err: &impl fmt::Display) -> ToolResponse {
    ToolResponse::failure(format!("Failed to {verb} {period} note: {err}"))
}

impl<R, C> ToolRouter<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    async fn periodic(
        &self,
        verb: &str,
        period: Period,
        date: Option<&str>,
        build: impl FnOnce(String) -> DispatchRequest + Send,
    ) -> Result<DispatchPayload, ToolResponse> {
        let path = periodic_path(period, date).map_err(|err| failed(verb, period, &err))?;
        self.dispatcher
            .dispatch(build(path))
            .await
            .map_err(|err| failed(verb, period, &err))
    }

    pub(super) async fn get_periodic_note(&self, args: PeriodicArgs) -> ToolResponse {
        let PeriodicArgs {
            period,
            date,
            vault,
        } = args;
        let day = date.as_deref();
        match self
            .periodic("retrieve", period, day, |path| {
                DispatchRequest::get(path).on_endpoint(vault)
            })
            .await
        {
            Ok(payload) => ToolResponse::success(format!(
                "Successfully retrieved {period} note{}:\n\n{}",
                for_date(day),
                payload.to_display_string()
            )),
            Err(response) => response,
        }
    }

    pub(super) async fn append_to_periodic_note(&self, args: PeriodicContentArgs) -> ToolResponse {
        let PeriodicContentArgs {
            period,
            content,
            date,
            vault,
        } = args;
        let day = date.as_deref();
        match self
            .periodic("append to", period, day, |path| {
                DispatchRequest::post(path)
                    .with_text(content)
                    .with_header("Content-Type", MARKDOWN)
                    .on_endpoint(vault)
            })
            .await
        {
            Ok(_) => ToolResponse::success(format!(
                "Successfully appended content to {period} note{}",
                for_date(day)
            )),
            Err(response) => response,
        }
    }

    pub(super) async fn replace_periodic_note(&self, args: PeriodicContentArgs) -> ToolResponse {
        let PeriodicContentArgs {
            period,
            content,
            date,
            vault,
        } = args;
        let day = date.as_deref();
        match self
            .periodic("replace", period, day, |path| {
                DispatchRequest::put(path)
                    .with_text(content)
                    .with_header("Content-Type", MARKDOWN)
                    .on_endpoint(vault)
            })
            .await
        {
            Ok(_) => ToolResponse::success(format!(
                "Successfully replaced {period} note content{}",
                for_date(day)
            )),
            Err(response) => response,
        }
    }

    pub(super) async fn patch_periodic_note(&self, args: PeriodicPatchArgs) -> ToolResponse {
        let PeriodicPatchArgs {
            period,
            operation,
            target_type,
            target,
            content,
            create_target_if_missing,
            date,
            vault,
        } = args;
        let day = date.as_deref();
        let encoded_target = encode_component(&target);
        match self
            .periodic("patch", period, day, |path| {
                let mut request = DispatchRequest::patch(path)
                    .with_text(content)
                    .with_header("Content-Type", MARKDOWN)
                    .with_header("Operation", operation.as_str())
                    .with_header("Target-Type", target_type.as_str())
                    .with_header("Target", encoded_target);
                if let Some(create) = create_target_if_missing {
                    request = request.with_header("Create-Target-If-Missing", create.to_string());
                }
                request.on_endpoint(vault)
            })
            .await
        {
            Ok(_) => ToolResponse::success(format!(
                "Successfully patched {period} note{} with {} operation on {} \"{target}\"",
                for_date(day),
                operation.as_str(),
                target_type.as_str()
            )),
            Err(response) => response,
        }
    }

    pub(super) async fn delete_periodic_note(&self, args: PeriodicArgs) -> ToolResponse {
        let PeriodicArgs {
            period,
            date,
            vault,
        } = args;
        let day = date.as_deref();
        match self
            .periodic("delete", period, day, |path| {
                DispatchRequest::delete(path).on_endpoint(vault)
            })
            .await
        {
            Ok(_) => ToolResponse::success(format!(
                "Successfully deleted {period} note{}",
                for_date(day)
            )),
            Err(response) => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::current(Period::Daily, None, "/periodic/daily/")]
    #[case::dated(Period::Weekly, Some("2024-03-07"), "/periodic/weekly/2024/03/07/")]
    fn periodic_paths_follow_the_period_and_date(
        #[case] period: Period,
        #[case] date: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(periodic_path(period, date).as_deref(), Ok(expected));
    }

    #[rstest]
    #[case::wrong_order("07-03-2024")]
    #[case::impossible_day("2024-02-30")]
    #[case::free_text("yesterday")]
    fn malformed_dates_are_rejected(#[case] date: &str) {
        assert!(periodic_path(Period::Monthly, Some(date)).is_err());
    }
}
