pub const MAX_SUGGESTIONS: usize = 8;

/// Subreddits offered in the guess dropdown.
pub const SUBREDDITS: &[&str] = &[
    "AskReddit",
    "AmItheAsshole",
    "todayilearned",
    "tifu",
    "explainlikeimfive",
    "LifeProTips",
    "unpopularopinion",
    "Showerthoughts",
    "NoStupidQuestions",
    "relationship_advice",
    "relationships",
    "confession",
    "TrueOffMyChest",
    "offmychest",
    "AskMen",
    "AskWomen",
    "AskScience",
    "askhistorians",
    "personalfinance",
    "legaladvice",
    "antiwork",
    "maliciouscompliance",
    "pettyrevenge",
    "ProRevenge",
    "entitledparents",
    "choosingbeggars",
    "MildlyInfuriating",
    "mildlyinteresting",
    "interestingasfuck",
    "Damnthatsinteresting",
    "WTF",
    "funny",
    "pics",
    "gaming",
    "movies",
    "television",
    "books",
    "Music",
    "science",
    "worldnews",
    "news",
    "technology",
    "programming",
    "cscareerquestions",
    "ExperiencedDevs",
    "sysadmin",
    "talesfromtechsupport",
    "TalesFromRetail",
    "TalesFromYourServer",
    "KitchenConfidential",
    "Cooking",
    "fitness",
    "loseit",
    "running",
    "travel",
    "parenting",
    "Teachers",
    "nursing",
    "dating_advice",
    "weddingshaming",
    "insaneparents",
    "raisedbynarcissists",
    "BestofRedditorUpdates",
    "AITAH",
    "WouldYouRather",
    "DoesAnybodyElse",
    "CasualConversation",
    "productivity",
    "getdisciplined",
    "Frugal",
    "povertyfinance",
    "jobs",
    "careerguidance",
    "HomeImprovement",
    "DIY",
    "gardening",
    "dogs",
    "cats",
    "aww",
];

/// Case-insensitive substring filter over `candidates`, in list order.
pub fn filter_subreddits<'a>(query: &str, candidates: &[&'a str]) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .copied()
        .collect()
}

/// Keyboard highlight over a suggestion list. Moves clamp at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self { index: None, len }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn move_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = Some(match self.index {
            None => 0,
            Some(i) => (i + 1).min(self.len - 1),
        });
    }

    pub fn move_up(&mut self) {
        if let Some(i) = self.index {
            self.index = Some(i.saturating_sub(1));
        }
    }
}
