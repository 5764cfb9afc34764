use crate::input::Reader;
use crate::metrics::Metric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Prediction and label files are parallel arrays in TSV.
    Aligned,
    /// JSON question-answering data; example counts need not match.
    SpanExtraction,
}

#[derive(Debug, Clone, Copy)]
pub struct TaskDef {
    pub id: &'static str,
    pub languages: &'static [&'static str],
    pub reader: Reader,
    pub metric: Metric,
}

#[derive(Debug, Clone, Copy)]
pub struct GroupDef {
    pub id: &'static str,
    pub kind: GroupKind,
    pub tasks: &'static [&'static str],
}

const PAWSX_LANGS: &[&str] = &["de", "en", "es", "fr", "ja", "ko", "zh"];
const XNLI_LANGS: &[&str] = &[
    "ar", "bg", "de", "el", "en", "es", "fr", "hi", "ru", "sw", "th", "tr", "ur", "vi", "zh",
];
const UDPOS_LANGS: &[&str] = &[
    "af", "ar", "bg", "de", "el", "en", "es", "et", "eu", "fa", "fi", "fr", "he", "hi", "hu", "id",
    "it", "ja", "kk", "ko", "mr", "nl", "pt", "ru", "ta", "te", "th", "tl", "tr", "ur", "vi", "yo",
    "zh",
];
const PANX_LANGS: &[&str] = &[
    "ar", "he", "vi", "id", "jv", "ms", "tl", "eu", "ml", "ta", "te", "af", "nl", "en", "de", "el",
    "bn", "hi", "mr", "ur", "fa", "fr", "it", "pt", "es", "bg", "ru", "ja", "ka", "ko", "th", "sw",
    "yo", "my", "zh", "kk", "tr", "et", "fi", "hu",
];
const XQUAD_LANGS: &[&str] = &[
    "en", "es", "de", "el", "ru", "tr", "ar", "vi", "th", "zh", "hi",
];
const MLQA_LANGS: &[&str] = &["en", "es", "de", "ar", "hi", "vi", "zh"];
const TYDIQA_LANGS: &[&str] = &["en", "ar", "bn", "fi", "id", "ko", "ru", "sw", "te"];
const TATOEBA_LANGS: &[&str] = &[
    "ar", "he", "vi", "id", "jv", "tl", "eu", "ml", "ta", "te", "af", "nl", "de", "el", "bn", "hi",
    "mr", "ur", "fa", "fr", "it", "pt", "es", "bg", "ru", "ja", "ka", "ko", "th", "sw", "zh", "kk",
    "tr", "et", "fi", "hu",
];

const BUILTIN_TASKS: &[TaskDef] = &[
    TaskDef {
        id: "pawsx",
        languages: PAWSX_LANGS,
        reader: Reader::Labels,
        metric: Metric::Accuracy,
    },
    TaskDef {
        id: "xnli",
        languages: XNLI_LANGS,
        reader: Reader::Labels,
        metric: Metric::Accuracy,
    },
    TaskDef {
        id: "udpos",
        languages: UDPOS_LANGS,
        reader: Reader::Tags,
        metric: Metric::SeqevalF1,
    },
    TaskDef {
        id: "panx",
        languages: PANX_LANGS,
        reader: Reader::Tags,
        metric: Metric::SeqevalF1,
    },
    TaskDef {
        id: "xquad",
        languages: XQUAD_LANGS,
        reader: Reader::Squad,
        metric: Metric::SquadEmF1,
    },
    TaskDef {
        id: "mlqa",
        languages: MLQA_LANGS,
        reader: Reader::Squad,
        metric: Metric::MlqaEmF1,
    },
    TaskDef {
        id: "tydiqa",
        languages: TYDIQA_LANGS,
        reader: Reader::Squad,
        metric: Metric::SquadEmF1,
    },
    TaskDef {
        id: "tatoeba",
        languages: TATOEBA_LANGS,
        reader: Reader::Labels,
        metric: Metric::Accuracy,
    },
];

const BUILTIN_GROUPS: &[GroupDef] = &[
    GroupDef {
        id: "classification",
        kind: GroupKind::Aligned,
        tasks: &["pawsx", "xnli"],
    },
    GroupDef {
        id: "structured_prediction",
        kind: GroupKind::Aligned,
        tasks: &["udpos", "panx"],
    },
    GroupDef {
        id: "qa",
        kind: GroupKind::SpanExtraction,
        tasks: &["xquad", "mlqa", "tydiqa"],
    },
    GroupDef {
        id: "retrieval",
        kind: GroupKind::Aligned,
        tasks: &["tatoeba"],
    },
];

pub const fn builtin_tasks() -> &'static [TaskDef] {
    BUILTIN_TASKS
}

pub const fn builtin_groups() -> &'static [GroupDef] {
    BUILTIN_GROUPS
}
