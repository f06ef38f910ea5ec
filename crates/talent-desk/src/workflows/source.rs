//! Where a reviewer picks candidates from.

use std::str::FromStr;

use crate::api::{ApiError, HrApi};
use crate::models::{Employee, PendingCandidate};

use super::roster::CandidateList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Search already registered employees.
    Registered,
    /// Upload a resume and evaluate it.
    ResumeUpload,
    /// Decide on applicants waiting in the pending queue.
    PendingQueue,
}

impl CandidateSource {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateSource::Registered => "registered",
            CandidateSource::ResumeUpload => "upload",
            CandidateSource::PendingQueue => "pending",
        }
    }

    /// Fetches the list behind this source once. Uploads have no list.
    pub async fn load<A>(self, api: &A, page_size: usize) -> Result<SourceRoster, ApiError>
    where
        A: HrApi + ?Sized,
    {
        Ok(match self {
            CandidateSource::Registered => {
                SourceRoster::Registered(CandidateList::new(api.list_employees().await?, page_size))
            }
            CandidateSource::PendingQueue => {
                SourceRoster::Pending(CandidateList::new(api.list_pending().await?, page_size))
            }
            CandidateSource::ResumeUpload => SourceRoster::Upload,
        })
    }
}

impl FromStr for CandidateSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "registered" | "employees" => Ok(Self::Registered),
            "upload" | "resume" => Ok(Self::ResumeUpload),
            "pending" | "queue" => Ok(Self::PendingQueue),
            other => Err(format!(
                "unknown candidate source '{other}' (expected registered, upload or pending)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SourceRoster {
    Registered(CandidateList<Employee>),
    Pending(CandidateList<PendingCandidate>),
    Upload,
}

/// Re-fetches the pending queue into an existing list.
pub async fn refresh_pending<A>(
    api: &A,
    list: &mut CandidateList<PendingCandidate>,
) -> Result<(), ApiError>
where
    A: HrApi + ?Sized,
{
    list.replace(api.list_pending().await?);
    Ok(())
}

/// Re-fetches registered employees into an existing list.
pub async fn refresh_registered<A>(
    api: &A,
    list: &mut CandidateList<Employee>,
) -> Result<(), ApiError>
where
    A: HrApi + ?Sized,
{
    list.replace(api.list_employees().await?);
    Ok(())
}
