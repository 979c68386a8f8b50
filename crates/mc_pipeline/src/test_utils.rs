use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use mc_core::{ArticleRecord, CategoryLabel, Classifier, Error, Result, CATEGORY_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misbehavior {
    DropLast,
    UnknownLabel,
    Fail,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Constant,
    EchoTitle,
    Broken(Misbehavior),
}

/// Scripted classifier over the labels `label r0` .. `label r19` that counts
/// its invocations.
pub struct FixedClassifier {
    mode: Mode,
    labels: Vec<CategoryLabel>,
    calls: AtomicUsize,
}

impl fmt::Debug for FixedClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedClassifier").field("mode", &self.mode).finish()
    }
}

impl FixedClassifier {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            labels: (0..CATEGORY_COUNT)
                .map(|i| CategoryLabel::new(format!("label r{}", i)))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers `label r0`.
    pub fn constant() -> Self {
        Self::with_mode(Mode::Constant)
    }

    /// Answers `label <title>`, so titles `r0`..`r19` map onto known labels.
    pub fn echo_title() -> Self {
        Self::with_mode(Mode::EchoTitle)
    }

    pub fn misbehaving(misbehavior: Misbehavior) -> Self {
        Self::with_mode(Mode::Broken(misbehavior))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    fn name(&self) -> &str {
        "Fixed"
    }

    fn labels(&self) -> &[CategoryLabel] {
        &self.labels
    }

    async fn predict(&self, records: &[ArticleRecord]) -> Result<Vec<CategoryLabel>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first = self.labels[0].clone();
        match self.mode {
            Mode::Constant => Ok(vec![first; records.len()]),
            Mode::EchoTitle => Ok(records
                .iter()
                .map(|record| CategoryLabel::new(format!("label {}", record.title)))
                .collect()),
            Mode::Broken(Misbehavior::DropLast) => {
                Ok(vec![first; records.len().saturating_sub(1)])
            }
            Mode::Broken(Misbehavior::UnknownLabel) => {
                Ok(vec![CategoryLabel::from("not a label"); records.len()])
            }
            Mode::Broken(Misbehavior::Fail) => Err(Error::Inference("model exploded".to_string())),
        }
    }
}
