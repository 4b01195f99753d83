use std::fmt;

/// Where a single analyze request is in its lifecycle.
///
/// `AnalysisFailed` ends the request with an error, `ImageFailed` with a
/// degraded success, `ImageOk` with a full success; every path then moves
/// to `Responded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Received,
    Analyzing,
    AnalysisFailed,
    Analyzed,
    GeneratingImage,
    ImageFailed,
    ImageOk,
    Responded,
}

impl AnalysisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStage::Received => "received",
            AnalysisStage::Analyzing => "analyzing",
            AnalysisStage::AnalysisFailed => "analysis_failed",
            AnalysisStage::Analyzed => "analyzed",
            AnalysisStage::GeneratingImage => "generating_image",
            AnalysisStage::ImageFailed => "image_failed",
            AnalysisStage::ImageOk => "image_ok",
            AnalysisStage::Responded => "responded",
        }
    }

    pub fn can_advance_to(&self, next: AnalysisStage) -> bool {
        use AnalysisStage::*;

        matches!(
            (*self, next),
            (Received, Analyzing)
                // Rejected before any upstream call (credential or input).
                | (Received, AnalysisFailed)
                | (Analyzing, AnalysisFailed)
                | (Analyzing, Analyzed)
                | (Analyzed, GeneratingImage)
                | (GeneratingImage, ImageFailed)
                | (GeneratingImage, ImageOk)
                | (AnalysisFailed, Responded)
                | (ImageFailed, Responded)
                | (ImageOk, Responded)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AnalysisStage::AnalysisFailed | AnalysisStage::ImageFailed | AnalysisStage::ImageOk
        )
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks and logs the stage of one request.
#[derive(Debug)]
pub struct StageTracker {
    request_id: String,
    current: AnalysisStage,
}

impl StageTracker {
    pub fn new(request_id: impl Into<String>) -> Self {
        let tracker = Self {
            request_id: request_id.into(),
            current: AnalysisStage::Received,
        };
        log::debug!("[{}] stage: {}", tracker.request_id, tracker.current);
        tracker
    }

    pub fn current(&self) -> AnalysisStage {
        self.current
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn advance(&mut self, next: AnalysisStage) {
        debug_assert!(
            self.current.can_advance_to(next),
            "illegal stage transition {} -> {}",
            self.current,
            next
        );
        if !self.current.can_advance_to(next) {
            log::warn!(
                "[{}] unexpected stage transition {} -> {}",
                self.request_id,
                self.current,
                next
            );
        }
        log::debug!("[{}] stage: {} -> {}", self.request_id, self.current, next);
        self.current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::AnalysisStage::*;
    use super::*;

    #[test]
    fn test_happy_path_is_valid() {
        let path = [
            Received,
            Analyzing,
            Analyzed,
            GeneratingImage,
            ImageOk,
            Responded,
        ];
        assert!(path.windows(2).all(|w| w[0].can_advance_to(w[1])));
    }

    #[test]
    fn test_image_failure_cannot_revisit_analysis() {
        assert!(GeneratingImage.can_advance_to(ImageFailed));
        assert!(!ImageFailed.can_advance_to(Analyzing));
        assert!(!AnalysisFailed.can_advance_to(GeneratingImage));
        assert!(!Analyzing.can_advance_to(GeneratingImage));
    }

    #[test]
    fn test_terminal_stages() {
        assert!(AnalysisFailed.is_terminal());
        assert!(ImageFailed.is_terminal());
        assert!(ImageOk.is_terminal());
        assert!(!Analyzed.is_terminal());
        assert!(!Responded.is_terminal());
    }

    #[test]
    fn test_tracker_follows_transitions() {
        let mut tracker = StageTracker::new("req-1");
        assert_eq!(tracker.current(), Received);
        tracker.advance(Analyzing);
        tracker.advance(AnalysisFailed);
        assert_eq!(tracker.current(), AnalysisFailed);
        assert_eq!(tracker.request_id(), "req-1");
        assert_eq!(tracker.current().to_string(), "analysis_failed");
    }

    #[test]
    #[should_panic(expected = "illegal stage transition")]
    fn test_tracker_rejects_out_of_order_transition() {
        let mut tracker = StageTracker::new("req-2");
        tracker.advance(Analyzing);
        tracker.advance(GeneratingImage);
    }
}
