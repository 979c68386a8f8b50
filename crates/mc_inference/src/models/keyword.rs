use std::collections::HashMap;
use std::fmt;
use mc_core::{ArticleRecord, CategoryLabel, Classifier, Result};
use crate::features::tokenize;

/// Categories in tie-break order, each with the keywords that vote for it.
const CATEGORIES: [(&str, &[&str]); 20] = [
    (
        "Cardiology",
        &[
            "heart", "cardiac", "arrhythmia", "coronary", "myocardial", "atrial", "hypertension",
            "infarction", "cardiovascular", "valve",
        ],
    ),
    (
        "Oncology",
        &[
            "cancer", "tumor", "tumour", "carcinoma", "chemotherapy", "lymphoma", "leukemia",
            "metastatic", "melanoma", "oncology",
        ],
    ),
    (
        "Pulmonology",
        &[
            "lung", "pulmonary", "asthma", "copd", "respiratory", "pneumonia", "airway",
            "ventilation",
        ],
    ),
    (
        "Infectious Disease",
        &[
            "infection", "virus", "viral", "bacterial", "antibiotic", "hiv", "covid", "sepsis",
            "vaccine", "influenza",
        ],
    ),
    (
        "Neurology",
        &[
            "brain", "stroke", "neurologic", "neurological", "epilepsy", "seizure", "dementia",
            "alzheimer", "parkinson", "sclerosis",
        ],
    ),
    (
        "Gastroenterology",
        &[
            "liver", "hepatic", "hepatitis", "bowel", "colitis", "crohn", "gastric", "pancreatitis",
            "cirrhosis", "intestinal",
        ],
    ),
    (
        "Endocrinology",
        &[
            "diabetes", "insulin", "thyroid", "glucose", "obesity", "hormone", "endocrine",
            "metabolic",
        ],
    ),
    ("Nephrology", &["kidney", "renal", "dialysis", "nephropathy", "glomerular", "creatinine"]),
    (
        "Hematology",
        &[
            "anemia", "blood", "thrombosis", "hemophilia", "platelet", "coagulation", "sickle",
            "transfusion",
        ],
    ),
    ("Rheumatology", &["arthritis", "lupus", "rheumatoid", "autoimmune", "gout", "vasculitis"]),
    ("Dermatology", &["skin", "dermatitis", "psoriasis", "eczema", "rash", "cutaneous"]),
    (
        "Pediatrics",
        &[
            "child", "children", "infant", "infants", "pediatric", "neonatal", "newborn",
            "adolescent",
        ],
    ),
    (
        "Obstetrics and Gynecology",
        &[
            "pregnancy", "pregnant", "maternal", "preterm", "gynecologic", "ovarian", "cervical",
            "contraception",
        ],
    ),
    (
        "Psychiatry",
        &[
            "depression", "anxiety", "schizophrenia", "psychiatric", "bipolar", "suicide", "mental",
            "opioid",
        ],
    ),
    (
        "Surgery",
        &[
            "surgery", "surgical", "operative", "transplant", "transplantation", "laparoscopic",
            "resection",
        ],
    ),
    ("Genetics", &["gene", "genetic", "genome", "mutation", "genomic", "hereditary", "sequencing"]),
    ("Emergency Medicine", &["emergency", "trauma", "injury", "resuscitation", "overdose"]),
    (
        "Health Policy",
        &[
            "policy", "insurance", "medicare", "medicaid", "cost", "costs", "payment", "reform",
            "coverage",
        ],
    ),
    ("Medical Ethics", &["ethics", "ethical", "consent", "autonomy", "euthanasia", "legal"]),
    ("General Medicine", &[]),
];

/// Built-in classifier voting by keyword hits. Records without any hit fall
/// back to the last category.
pub struct KeywordModel {
    labels: Vec<CategoryLabel>,
    keywords: HashMap<&'static str, usize>,
}

impl fmt::Debug for KeywordModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordModel")
            .field("labels", &self.labels.len())
            .field("keywords", &self.keywords.len())
            .finish()
    }
}

impl Default for KeywordModel {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordModel {
    pub fn new() -> Self {
        let labels = CATEGORIES.iter().map(|(label, _)| CategoryLabel::from(*label)).collect();
        let keywords = CATEGORIES
            .iter()
            .enumerate()
            .flat_map(|(idx, (_, words))| words.iter().map(move |word| (*word, idx)))
            .collect();
        Self { labels, keywords }
    }

    fn classify(&self, record: &ArticleRecord) -> &CategoryLabel {
        let mut votes = [0usize; CATEGORIES.len()];
        for token in tokenize(record) {
            if let Some(&idx) = self.keywords.get(token.as_str()) {
                votes[idx] += 1;
            }
        }

        let fallback = self.labels.len() - 1;
        let best = votes
            .iter()
            .enumerate()
            .fold((fallback, 0), |(best, best_votes), (idx, &count)| {
                if count > best_votes { (idx, count) } else { (best, best_votes) }
            })
            .0;
        &self.labels[best]
    }
}

#[async_trait::async_trait]
impl Classifier for KeywordModel {
    fn name(&self) -> &str {
        "Keyword"
    }

    fn labels(&self) -> &[CategoryLabel] {
        &self.labels
    }

    async fn predict(&self, records: &[ArticleRecord]) -> Result<Vec<CategoryLabel>> {
        Ok(records.iter().map(|record| self.classify(record).clone()).collect())
    }
}
