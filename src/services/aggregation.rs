//! Pure aggregation over the match list: medal standings, vote-percentage
//! splits, and date-grouped schedule views. Everything here is re-computed
//! from the full current list on each call; there is no incremental state.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{
    config::AliasTable,
    dao::models::{MatchEntity, MatchStatus, MedalRound, VoteTallyEntity},
    dto::standings::StandingsRow,
};

/// The standings table is truncated to this many rows.
const STANDINGS_LIMIT: usize = 10;

/// Recognized level tokens, tried in this order when matching either the
/// prefix ("TY CS") or suffix ("CS TY") placement.
const LEVELS: [&str; 7] = ["FY", "SY", "TY", "LY", "BTECH", "MBA", "MTECH"];

/// Year words expanded before level matching; "FINAL YEAR" must come before
/// the bare "FINAL" so the longer phrase wins.
const YEAR_WORDS: [(&str, &str); 5] = [
    ("FIRST YEAR", "FY"),
    ("SECOND YEAR", "SY"),
    ("THIRD YEAR", "TY"),
    ("FINAL YEAR", "LY"),
    ("FINAL", "LY"),
];

/// Percentage split of a match's prediction votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSplit {
    /// Rounded percentage for team A.
    pub team_a: u8,
    /// Rounded percentage for team B.
    pub team_b: u8,
}

/// Turn a free-text team name into a canonical `"<LEVEL> <CODE>"` entity
/// token for standings aggregation.
///
/// The input is uppercased and trimmed, year words are expanded, then a
/// level token plus an alphanumeric code is matched in either order
/// (separated by spaces or hyphens) and canonicalized level-first. Names
/// without a recognized level fall back to their first token. The function
/// is idempotent: normalizing `"TY CS"` yields `"TY CS"` again.
pub fn normalize_entity(name: &str) -> String {
    let raw = name.trim().to_uppercase();
    if raw.is_empty() {
        return "UNKNOWN".into();
    }
    let norm = expand_year_words(&raw);

    let first = leading_alnum(&norm);
    if !first.is_empty() {
        let after_first = &norm[first.len()..];
        let separators = after_first.len() - trim_separators(after_first).len();
        if separators > 0 {
            let second = leading_alnum(trim_separators(after_first));
            // "TY CS": exact level first, then any alphanumeric code.
            if LEVELS.contains(&first) && !second.is_empty() {
                return format!("{first} {second}");
            }
            // "CS TY": code first, level second. The level only needs to
            // lead the second token, mirroring the original matcher.
            if let Some(level) = LEVELS.iter().find(|level| second.starts_with(*level)) {
                return format!("{level} {first}");
            }
        }
    }

    norm.split(is_separator)
        .next()
        .unwrap_or_default()
        .to_string()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

/// Maximal leading run of ASCII alphanumerics.
fn leading_alnum(input: &str) -> &str {
    let end = input
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(input.len());
    &input[..end]
}

fn trim_separators(input: &str) -> &str {
    input.trim_start_matches(is_separator)
}

fn expand_year_words(input: &str) -> String {
    let mut out = input.to_string();
    for (phrase, code) in YEAR_WORDS {
        out = replace_whole_word(&out, phrase, code);
    }
    out
}

/// Replace `needle` with `replacement` wherever it is not embedded in a
/// longer word (boundaries are non-alphanumeric, as in a `\b` match).
fn replace_whole_word(haystack: &str, needle: &str, replacement: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut result = String::with_capacity(haystack.len());
    let mut rest = haystack;

    while let Some(pos) = rest.find(needle) {
        let before_ok = !rest[..pos].chars().next_back().is_some_and(is_word);
        let after = &rest[pos + needle.len()..];
        let after_ok = !after.chars().next().is_some_and(is_word);

        if before_ok && after_ok {
            result.push_str(&rest[..pos]);
            result.push_str(replacement);
            rest = after;
        } else {
            result.push_str(&rest[..pos + needle.len()]);
            rest = after;
        }
    }
    result.push_str(rest);
    result
}

/// Compute the medal table from the full match list.
///
/// Only finished finals with a recorded winner count. The winner's entity
/// earns one Gold and the loser's one Silver; entities present in the alias
/// table fan the medal out to every listed sub-entity instead. Rows sort
/// descending by (gold, silver) with ties kept in first-encounter order,
/// truncated to the top ten.
pub fn medal_standings(matches: &[MatchEntity], aliases: &AliasTable) -> Vec<StandingsRow> {
    let mut tally: IndexMap<String, (u32, u32)> = IndexMap::new();

    for record in matches {
        if record.status != MatchStatus::Finished || record.medal_round != MedalRound::Final {
            continue;
        }
        let Some(winner_name) = record.winner.as_deref() else {
            continue;
        };

        let loser_name = if winner_name == record.team_a.name {
            &record.team_b.name
        } else {
            &record.team_a.name
        };

        award(&mut tally, aliases, normalize_entity(winner_name), Medal::Gold);
        award(&mut tally, aliases, normalize_entity(loser_name), Medal::Silver);
    }

    let mut rows: Vec<StandingsRow> = tally
        .into_iter()
        .map(|(entity, (gold, silver))| StandingsRow {
            entity,
            gold,
            silver,
        })
        .collect();
    // stable sort keeps encounter order for full ties
    rows.sort_by(|a, b| b.gold.cmp(&a.gold).then(b.silver.cmp(&a.silver)));
    rows.truncate(STANDINGS_LIMIT);
    rows
}

#[derive(Clone, Copy)]
enum Medal {
    Gold,
    Silver,
}

fn award(
    tally: &mut IndexMap<String, (u32, u32)>,
    aliases: &AliasTable,
    entity: String,
    medal: Medal,
) {
    let mut bump = |tally: &mut IndexMap<String, (u32, u32)>, key: String| {
        let entry = tally.entry(key).or_insert((0, 0));
        match medal {
            Medal::Gold => entry.0 += 1,
            Medal::Silver => entry.1 += 1,
        }
    };

    match aliases.sub_entities(&entity) {
        // combined team: every sub-entity receives the full medal
        Some(subs) => {
            for sub in subs {
                bump(tally, sub.clone());
            }
        }
        None => bump(tally, entity),
    }
}

/// Percentage split of a match's votes. A match nobody voted on reports
/// 50/50; otherwise each side is independently rounded, so the two values
/// are not guaranteed to sum to exactly 100 (accepted, not corrected).
pub fn vote_split(votes: &VoteTallyEntity) -> VoteSplit {
    let total = votes.team_a + votes.team_b;
    if total == 0 {
        return VoteSplit {
            team_a: 50,
            team_b: 50,
        };
    }
    let percent = |count: u32| ((f64::from(count) / f64::from(total)) * 100.0).round() as u8;
    VoteSplit {
        team_a: percent(votes.team_a),
        team_b: percent(votes.team_b),
    }
}

/// Group matches by their day label. Groups are ordered by ascending string
/// comparison of the label, not calendar order; the labels are opaque.
pub fn group_by_date(matches: Vec<MatchEntity>) -> Vec<(String, Vec<MatchEntity>)> {
    let mut groups: BTreeMap<String, Vec<MatchEntity>> = BTreeMap::new();
    for record in matches {
        groups.entry(record.date.clone()).or_default().push(record);
    }
    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::{Category, Gender, TeamSideEntity};
    use std::time::SystemTime;
    use uuid::Uuid;

    fn finished_final(team_a: &str, team_b: &str, winner: &str) -> MatchEntity {
        MatchEntity {
            id: Uuid::new_v4(),
            sport_name: "Football".into(),
            category: Category::Team,
            gender: Gender::Boys,
            date: "Jan 24".into(),
            time: "10:00".into(),
            venue: "Main Ground".into(),
            round_name: "Final".into(),
            team_a: TeamSideEntity {
                name: team_a.into(),
                score: 1,
            },
            team_b: TeamSideEntity {
                name: team_b.into(),
                score: 0,
            },
            status: MatchStatus::Finished,
            winner: Some(winner.into()),
            medal_round: MedalRound::Final,
            votes: VoteTallyEntity::default(),
            created_at: SystemTime::now(),
            updated_at: SystemTime::now(),
        }
    }

    fn row<'a>(rows: &'a [StandingsRow], entity: &str) -> &'a StandingsRow {
        rows.iter()
            .find(|row| row.entity == entity)
            .unwrap_or_else(|| panic!("no row for {entity}"))
    }

    #[test]
    fn normalization_is_idempotent() {
        assert_eq!(normalize_entity("TY CS"), "TY CS");
        assert_eq!(normalize_entity(normalize_entity("ty cs").as_str()), "TY CS");
    }

    #[test]
    fn normalization_is_order_invariant() {
        assert_eq!(normalize_entity("CS TY"), "TY CS");
        assert_eq!(normalize_entity("TY CS"), normalize_entity("CS TY"));
    }

    #[test]
    fn normalization_expands_year_words() {
        assert_eq!(normalize_entity("Third Year CS"), "TY CS");
        assert_eq!(normalize_entity("final year IT"), "LY IT");
        assert_eq!(normalize_entity("FINAL MECH"), "LY MECH");
    }

    #[test]
    fn normalization_handles_hyphens_and_case() {
        assert_eq!(normalize_entity("  ty-cs "), "TY CS");
        assert_eq!(normalize_entity("btech CE"), "BTECH CE");
    }

    #[test]
    fn normalization_falls_back_to_first_token() {
        assert_eq!(normalize_entity("Faculty Team"), "FACULTY");
        assert_eq!(normalize_entity("Staff"), "STAFF");
        assert_eq!(normalize_entity(""), "UNKNOWN");
        assert_eq!(normalize_entity("   "), "UNKNOWN");
    }

    #[test]
    fn year_word_expansion_respects_word_boundaries() {
        // SEMIFINAL must not become SEMILY
        assert_eq!(expand_year_words("SEMIFINAL MATCH"), "SEMIFINAL MATCH");
        assert_eq!(expand_year_words("FINAL MATCH"), "LY MATCH");
    }

    #[test]
    fn standings_award_one_gold_and_one_silver_per_final() {
        let matches = vec![
            finished_final("SY IT", "TY CS", "TY CS"),
            finished_final("FY CE", "SY IT", "SY IT"),
        ];
        let rows = medal_standings(&matches, &AliasTable::default());

        assert_eq!(row(&rows, "TY CS").gold, 1);
        assert_eq!(row(&rows, "SY IT").gold, 1);
        assert_eq!(row(&rows, "SY IT").silver, 1);
        assert_eq!(row(&rows, "FY CE").silver, 1);

        let golds: u32 = rows.iter().map(|row| row.gold).sum();
        let silvers: u32 = rows.iter().map(|row| row.silver).sum();
        assert_eq!(golds, 2);
        assert_eq!(silvers, 2);
    }

    #[test]
    fn standings_ignore_non_finals_and_unfinished_matches() {
        let mut not_final = finished_final("SY IT", "TY CS", "TY CS");
        not_final.medal_round = MedalRound::None;
        let mut still_live = finished_final("FY CE", "SY IT", "SY IT");
        still_live.status = MatchStatus::Live;
        let mut no_winner = finished_final("FY CE", "SY IT", "SY IT");
        no_winner.winner = None;

        let rows = medal_standings(&[not_final, still_live, no_winner], &AliasTable::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn standings_fan_out_alias_groups() {
        let aliases = AliasTable::from_iter([("TY GIRLS", ["TY CS", "TY IT"])]);
        let matches = vec![finished_final("TY GIRLS", "SY IT", "TY GIRLS")];
        let rows = medal_standings(&matches, &aliases);

        assert_eq!(row(&rows, "TY CS").gold, 1);
        assert_eq!(row(&rows, "TY IT").gold, 1);
        assert_eq!(row(&rows, "SY IT").silver, 1);
        assert!(rows.iter().all(|row| row.entity != "TY GIRLS"));
    }

    #[test]
    fn standings_sort_by_gold_then_silver_with_encounter_order_ties() {
        let matches = vec![
            finished_final("FY CE", "SY CE", "FY CE"),
            finished_final("TY CS", "SY IT", "TY CS"),
            finished_final("TY CS", "FY CE", "TY CS"),
        ];
        let rows = medal_standings(&matches, &AliasTable::default());

        assert_eq!(rows[0].entity, "TY CS");
        assert_eq!(rows[0].gold, 2);
        // FY CE and SY IT both hold one medal-table position below; FY CE
        // has (1 gold, 1 silver) and outranks the silver-only entities,
        // which stay in encounter order.
        assert_eq!(rows[1].entity, "FY CE");
        assert_eq!(rows[2].entity, "SY CE");
        assert_eq!(rows[3].entity, "SY IT");
    }

    #[test]
    fn standings_truncate_to_ten_rows() {
        let matches: Vec<MatchEntity> = (0..12)
            .map(|i| {
                finished_final(
                    &format!("TY A{i}"),
                    &format!("SY B{i}"),
                    &format!("TY A{i}"),
                )
            })
            .collect();
        let rows = medal_standings(&matches, &AliasTable::default());
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn vote_split_is_even_with_no_votes() {
        let split = vote_split(&VoteTallyEntity::default());
        assert_eq!(split, VoteSplit { team_a: 50, team_b: 50 });
    }

    #[test]
    fn vote_split_rounds_each_side() {
        let split = vote_split(&VoteTallyEntity { team_a: 3, team_b: 1 });
        assert_eq!(split, VoteSplit { team_a: 75, team_b: 25 });

        // 1/3 vs 2/3 rounds to 33/67
        let split = vote_split(&VoteTallyEntity { team_a: 1, team_b: 2 });
        assert_eq!(split, VoteSplit { team_a: 33, team_b: 67 });
    }

    #[test]
    fn grouping_orders_sections_by_label_string() {
        let mut a = finished_final("SY IT", "TY CS", "TY CS");
        a.date = "Jan 24".into();
        let mut b = finished_final("FY CE", "SY IT", "SY IT");
        b.date = "Jan 23".into();
        let mut c = finished_final("TY CS", "FY CE", "TY CS");
        c.date = "Jan 25".into();

        let groups = group_by_date(vec![a, b, c]);
        let labels: Vec<&str> = groups.iter().map(|(date, _)| date.as_str()).collect();
        assert_eq!(labels, vec!["Jan 23", "Jan 24", "Jan 25"]);
    }
}
