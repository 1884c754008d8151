use guess_types::{ClueKind, Clues, RevealedClue};

/// Order in which clues are unlocked, one per guess made.
pub const CLUE_ORDER: [ClueKind; 4] = [
    ClueKind::UpvoteRatio,
    ClueKind::TopComment,
    ClueKind::CommunityStats,
    ClueKind::SidebarRule,
];

pub fn clue_text(clues: &Clues, kind: ClueKind) -> &str {
    match kind {
        ClueKind::UpvoteRatio => &clues.upvote_ratio,
        ClueKind::TopComment => &clues.top_comment,
        ClueKind::CommunityStats => &clues.community_stats,
        ClueKind::SidebarRule => &clues.sidebar_rule,
    }
}

/// Clues visible after `guesses_made` guesses, correct or not.
pub fn revealed_clues(clues: &Clues, guesses_made: usize) -> Vec<RevealedClue> {
    CLUE_ORDER
        .iter()
        .take(guesses_made)
        .map(|&kind| RevealedClue {
            kind,
            text: clue_text(clues, kind).to_string(),
        })
        .collect()
}
