use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rusqlite::types::Value;

use crate::domain::catalog::{column_count, position_code, position_string, RATING_COLUMN_COUNT};
use crate::domain::date::{date_to_days, days_to_date};
use crate::domain::entities::filter::{Category, Direction, LookupOption, QueryPayload};
use crate::domain::entities::player::{CellValue, DisplayName, PlayerRecord, MAX_POSITIONS};
use crate::infra::sqlite::schema::open_connection;

const PLAYER_SELECT: &str = "
    SELECT p.id, p.forename, p.surname,
           COALESCE(n.name, ''), COALESCE(sn.name, ''),
           COALESCE(cc.name, ''), COALESCE(cp.name, ''),
           p.birth_days, p.positions,
           COALESCE(p.gk_rating, -1.0), COALESCE(p.ld_rating, -1.0),
           COALESCE(p.rd_rating, -1.0), COALESCE(p.lw_rating, -1.0),
           COALESCE(p.c_rating, -1.0), COALESCE(p.rw_rating, -1.0),
           p.current_ability, p.potential_ability, p.adaptability, p.ambition,
           p.determination, p.loyalty, p.professionalism, p.temperament
    FROM player p
    LEFT JOIN nation n ON n.id = p.nation_id
    LEFT JOIN nation sn ON sn.id = p.second_nation_id
    LEFT JOIN club cc ON cc.id = p.club_contracted_id
    LEFT JOIN club cp ON cp.id = p.club_playing_id";

/// Number of trailing integer attribute columns in `PLAYER_SELECT`.
const ATTRIBUTE_COLUMNS: usize = 8;

/// Columns a category's ids are matched against.
fn category_columns(category: Category) -> &'static [&'static str] {
    match category {
        Category::Nationality => &["p.nation_id", "p.second_nation_id"],
        Category::ClubContracted => &["p.club_contracted_id"],
        Category::ClubPlaying => &["p.club_playing_id"],
        Category::CompetitionContracted => &["cc.competition_id"],
        Category::CompetitionPlaying => &["cp.competition_id"],
        Category::NationContracted => &["cc.nation_id"],
        Category::NationPlaying => &["cp.nation_id"],
    }
}

fn push_membership_clause(
    clauses: &mut Vec<String>,
    params: &mut Vec<Value>,
    direction: Direction,
    category: Category,
    ids: &[i32],
) {
    if ids.is_empty() {
        return;
    }

    let placeholders = std::iter::repeat_n("?", ids.len())
        .collect::<Vec<_>>()
        .join(",");
    let membership = category_columns(category)
        .iter()
        .map(|column| {
            params.extend(ids.iter().map(|id| Value::Integer(i64::from(*id))));
            format!("IFNULL({column} IN ({placeholders}), 0)")
        })
        .collect::<Vec<_>>()
        .join(" OR ");

    clauses.push(match direction {
        Direction::Include => format!("({membership})"),
        Direction::Exclude => format!("NOT ({membership})"),
    });
}

fn push_flag_clause(
    clauses: &mut Vec<String>,
    params: &mut Vec<Value>,
    expr: &str,
    value: Option<bool>,
) {
    if let Some(value) = value {
        clauses.push(format!("({expr}) = ?"));
        params.push(Value::Integer(i64::from(value)));
    }
}

/// Builds the WHERE clause and its parameters for a payload.
pub fn build_player_filter(payload: &QueryPayload) -> (String, Vec<Value>) {
    let mut clauses = Vec::<String>::new();
    let mut params = Vec::<Value>::new();

    for direction in Direction::ALL {
        for category in Category::ALL {
            push_membership_clause(
                &mut clauses,
                &mut params,
                direction,
                category,
                payload.ids(direction, category),
            );
        }
    }

    if payload.birth_years_constrained() {
        let (min_year, max_year) = payload.birth_years;
        if let Some(lower) = date_to_days(min_year, 1, 1) {
            clauses.push("p.birth_days >= ?".to_string());
            params.push(Value::Integer(lower));
        }
        if let Some(upper) = date_to_days(max_year, 12, 31) {
            clauses.push("p.birth_days <= ?".to_string());
            params.push(Value::Integer(upper));
        }
    }

    push_flag_clause(
        &mut clauses,
        &mut params,
        "p.can_play_for_country",
        payload.can_play_for_country,
    );
    push_flag_clause(
        &mut clauses,
        &mut params,
        "p.second_nation_id IS NOT NULL",
        payload.has_second_nationality,
    );
    push_flag_clause(
        &mut clauses,
        &mut params,
        "p.declared_for_nation",
        payload.has_declared_for_nation,
    );

    if clauses.is_empty() {
        return ("1 = 1".to_string(), params);
    }
    (clauses.join(" AND "), params)
}

/// Parses the comma separated positions stored with a player, given either
/// as numeric codes or as labels such as `LW`.
pub fn parse_positions(raw: &str) -> Vec<u8> {
    raw.split(',')
        .filter_map(|code| code.trim().parse::<u8>().ok().or_else(|| position_code(code)))
        .filter(|code| *code > 0)
        .take(MAX_POSITIONS)
        .collect()
}

fn read_player(row: &rusqlite::Row<'_>) -> Result<PlayerRecord> {
    let id: i64 = row.get(0).context("failed to read player id")?;
    let name = DisplayName::new(
        row.get::<_, String>(1).context("failed to read forename")?,
        row.get::<_, String>(2).context("failed to read surname")?,
    );
    let birth_days: i64 = row.get(7).context("failed to read birth_days")?;
    let date_of_birth = days_to_date(birth_days)
        .ok_or_else(|| anyhow!("birth date out of range for player #{id}"))?;
    let positions = parse_positions(&row.get::<_, String>(8).context("failed to read positions")?);

    let mut columns = Vec::with_capacity(column_count());
    columns.push(CellValue::Text(name.to_string()));
    for idx in 3..=6 {
        let text: String = row
            .get(idx)
            .with_context(|| format!("failed to read text column {idx}"))?;
        columns.push(CellValue::Text(text));
    }
    columns.push(CellValue::from(birth_days));
    columns.push(CellValue::Text(position_string(&positions)));
    for idx in 9..9 + RATING_COLUMN_COUNT {
        let rating: f64 = row
            .get(idx)
            .with_context(|| format!("failed to read rating column {idx}"))?;
        columns.push(CellValue::Number(rating));
    }
    let first_attribute = 9 + RATING_COLUMN_COUNT;
    for idx in first_attribute..first_attribute + ATTRIBUTE_COLUMNS {
        let value: i64 = row
            .get(idx)
            .with_context(|| format!("failed to read attribute column {idx}"))?;
        columns.push(CellValue::from(value));
    }

    Ok(PlayerRecord {
        id,
        name,
        date_of_birth,
        positions,
        columns,
    })
}

pub fn fetch_players(db_path: &Path, payload: &QueryPayload) -> Result<Vec<PlayerRecord>> {
    let conn = open_connection(db_path)?;
    let (where_sql, params) = build_player_filter(payload);
    let sql = format!("{PLAYER_SELECT} WHERE {where_sql} ORDER BY p.id ASC");

    let mut stmt = conn
        .prepare(&sql)
        .context("failed to prepare player query")?;
    let mut rows = stmt
        .query(rusqlite::params_from_iter(params))
        .context("failed to run player query")?;

    let mut players = Vec::new();
    while let Some(row) = rows.next().context("failed to read player row")? {
        players.push(read_player(row)?);
    }

    Ok(players)
}

pub fn lookup_options(db_path: &Path, category: Category) -> Result<Vec<LookupOption>> {
    let table = match category {
        Category::Nationality | Category::NationContracted | Category::NationPlaying => "nation",
        Category::ClubContracted | Category::ClubPlaying => "club",
        Category::CompetitionContracted | Category::CompetitionPlaying => "competition",
    };

    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, name FROM {table} ORDER BY name ASC, id ASC"
        ))
        .with_context(|| format!("failed to prepare {table} lookup"))?;
    let options = stmt
        .query_map([], |row| {
            Ok(LookupOption {
                id: row.get(0)?,
                label: row.get(1)?,
            })
        })
        .with_context(|| format!("failed to query {table} lookup"))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("failed to collect {table} lookup"))?;

    Ok(options)
}

pub fn ingame_date_range(db_path: &Path) -> Result<(i64, i64)> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT earliest_days, latest_days FROM save_meta LIMIT 1",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .context("failed to read in-game date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_has_no_constraints() {
        let (where_sql, params) = build_player_filter(&QueryPayload::default());
        assert_eq!(where_sql, "1 = 1");
        assert!(params.is_empty());
    }

    #[test]
    fn nationality_matches_either_nation_column() {
        let payload = QueryPayload {
            include_nationalities: vec![7, 9],
            ..QueryPayload::default()
        };

        let (where_sql, params) = build_player_filter(&payload);

        assert_eq!(
            where_sql,
            "(IFNULL(p.nation_id IN (?,?), 0) OR IFNULL(p.second_nation_id IN (?,?), 0))"
        );
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn exclusions_and_flags_are_negated_and_bound() {
        let payload = QueryPayload {
            exclude_clubs_playing: vec![3],
            has_second_nationality: Some(false),
            ..QueryPayload::default()
        };

        let (where_sql, params) = build_player_filter(&payload);

        assert_eq!(
            where_sql,
            "NOT (IFNULL(p.club_playing_id IN (?), 0)) AND (p.second_nation_id IS NOT NULL) = ?"
        );
        assert_eq!(params, vec![Value::Integer(3), Value::Integer(0)]);
    }

    #[test]
    fn birth_years_bound_both_ends() {
        let payload = QueryPayload {
            birth_years: (1990, 1995),
            ..QueryPayload::default()
        };

        let (where_sql, params) = build_player_filter(&payload);

        assert_eq!(where_sql, "p.birth_days >= ? AND p.birth_days <= ?");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn positions_parse_ignores_noise() {
        assert_eq!(parse_positions("5,4"), vec![5, 4]);
        assert_eq!(parse_positions(""), Vec::<u8>::new());
        assert_eq!(parse_positions("1, x, 0, 2,3,4,5,6,1"), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(parse_positions("C, lw"), vec![5, 4]);
    }
}
