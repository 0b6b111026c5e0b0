use crate::workflows::ideas::IdeaStatus;

/// Map a normalized legacy status label to the current workflow state.
pub(crate) fn status_for_normalized(label: &str) -> Option<IdeaStatus> {
    match label {
        "draft" => Some(IdeaStatus::Draft),
        "submitted" | "pending" | "pending review" | "under review" => {
            Some(IdeaStatus::Submitted)
        }
        "needs revision" | "needs work" | "revision requested" => Some(IdeaStatus::NeedsRevision),
        "approved" => Some(IdeaStatus::Approved),
        "rejected" | "declined" => Some(IdeaStatus::Rejected),
        "published" | "live" => Some(IdeaStatus::Published),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(label: &str) -> Option<IdeaStatus> {
    status_for_normalized(&super::normalizer::normalize_label(label))
}
