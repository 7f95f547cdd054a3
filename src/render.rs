//! Server-side HTML for the site's pages.
//!
//! Every interpolated value goes through [`escape`]; upstream names are not
//! trusted to be markup-free.

use axum::http::StatusCode;
use chrono::NaiveDate;
use nba_api::{BoxScore, GameDetail, GameRecord, LeagueLeaders, TeamLine, TeamProfile, TeamRecord};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f6f6f4;color:#1d1d1f}\
header{background:#1d428a;padding:.75rem 1.5rem}\
header a{color:#fff;margin-right:1.25rem;text-decoration:none}\
main{max-width:960px;margin:0 auto;padding:1.5rem}\
table{border-collapse:collapse;width:100%;margin:.75rem 0}\
th,td{padding:.35rem .5rem;border-bottom:1px solid #ddd;text-align:left}\
.logo{height:48px;vertical-align:middle}.logo-sm{height:24px;vertical-align:middle}\
.game{background:#fff;border-radius:6px;padding:1rem;margin:.75rem 0}\
.won{font-weight:700}.status{color:#c8102e;font-size:.9rem}\
.error{background:#fdecea;padding:1rem;border-radius:6px}\
.day-nav{display:flex;justify-content:space-between;margin-bottom:1rem}";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    let title = escape(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | Courtside</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><nav><a href=\"/\">Courtside</a><a href=\"/teams\">Teams</a>\
         <a href=\"/scores\">Scores</a><a href=\"/statistics\">Statistics</a></nav></header>\n\
         <main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n"
    )
}

pub fn home_page() -> String {
    layout(
        "NBA Info",
        "<p>Rosters, daily scores and league leaders for every NBA team.</p>\n<ul>\n\
         <li><a href=\"/teams\">Browse teams</a></li>\n\
         <li><a href=\"/scores\">Today's scores</a></li>\n\
         <li><a href=\"/statistics\">League leaders</a></li>\n</ul>\n",
    )
}

pub fn teams_page(teams: &[TeamRecord]) -> String {
    let mut body = String::new();
    for (conference, divisions) in group_by_division(teams) {
        body.push_str(&format!("<section>\n<h2>{}</h2>\n", escape(conference)));
        for (division, members) in divisions {
            body.push_str(&format!("<h3>{}</h3>\n<ul>\n", escape(division)));
            for team in members {
                body.push_str(&format!(
                    "<li><a href=\"/teams/{}\">\
                     <img class=\"logo-sm\" src=\"{}\" alt=\"\"> {}</a></li>\n",
                    escape(&team.id),
                    escape(&team.logo_url),
                    escape(&team.full_name),
                ));
            }
            body.push_str("</ul>\n");
        }
        body.push_str("</section>\n");
    }
    layout("Teams", &body)
}

type Grouped<'a> = Vec<(&'a str, Vec<(&'a str, Vec<&'a TeamRecord>)>)>;

/// Conference -> division -> teams, in first-seen order.
fn group_by_division(teams: &[TeamRecord]) -> Grouped<'_> {
    let mut grouped: Grouped<'_> = Vec::new();
    for team in teams {
        let index = match grouped.iter().position(|(c, _)| *c == team.conference) {
            Some(i) => i,
            None => {
                grouped.push((&team.conference, Vec::new()));
                grouped.len() - 1
            }
        };
        let conference = &mut grouped[index].1;
        match conference.iter_mut().find(|(d, _)| *d == team.division) {
            Some((_, members)) => members.push(team),
            None => conference.push((&team.division, vec![team])),
        }
    }
    grouped
}

pub fn team_page(team: &TeamProfile) -> String {
    let mut body = format!(
        "<p><img class=\"logo\" src=\"{}\" alt=\"{} logo\"> {} &middot; {}</p>\n",
        escape(&team.logo_url),
        escape(&team.full_name),
        escape(&team.conference),
        escape(&team.division),
    );

    if let Some(standing) = &team.standing {
        let rank = standing
            .rank
            .map(|r| format!(" &middot; {} in conference", ordinal(r)))
            .unwrap_or_default();
        body.push_str(&format!(
            "<p>Record: {}-{} ({:.3}){rank}</p>\n",
            standing.won, standing.lost, standing.win_pct
        ));
    }

    let venue = &team.venue;
    body.push_str(&format!("<h2>Arena</h2>\n<p>{}", escape(&venue.name)));
    let location = venue.location();
    if !location.is_empty() {
        body.push_str(&format!(", {}", escape(&location)));
    }
    if venue.capacity > 0 {
        body.push_str(&format!(" &middot; capacity {}", venue.capacity));
    }
    body.push_str("</p>\n");

    body.push_str(
        "<h2>Roster</h2>\n<table>\n<tr><th>#</th><th>Name</th><th>Pos</th><th>Ht</th>\
         <th>Wt</th><th>Exp</th><th>College</th></tr>\n",
    );
    for p in &team.roster {
        let weight = if p.weight > 0 { p.weight.to_string() } else { String::new() };
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{weight}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&p.jersey_number),
            escape(&p.full_name),
            escape(&p.position),
            escape(&p.height_display()),
            escape(&p.experience),
            escape(&p.college),
        ));
    }
    body.push_str("</table>\n");

    layout(&team.full_name, &body)
}

pub fn scores_page(date: NaiveDate, games: &[GameRecord]) -> String {
    let day_link = |day: Option<NaiveDate>, label: &str| match day {
        Some(d) => format!("<a href=\"/scores?date={}\">{label}</a>", d.format("%Y-%m-%d")),
        None => String::new(),
    };
    let mut body = format!(
        "<div class=\"day-nav\">{}<strong>{}</strong>{}</div>\n",
        day_link(date.pred_opt(), "&larr; Previous day"),
        date.format("%A, %B %-d, %Y"),
        day_link(date.succ_opt(), "Next day &rarr;"),
    );

    if games.is_empty() {
        body.push_str("<p>No games scheduled for this date.</p>\n");
    }
    for game in games {
        body.push_str(&format!(
            "<div class=\"game\">\n<p class=\"status\">{} &middot; {}</p>\n",
            escape(game.status.label()),
            escape(&game.time),
        ));
        body.push_str(&score_table(&game.away, &game.home));
        if !game.venue.is_empty() {
            body.push_str(&format!("<p>{}", escape(&game.venue)));
            if !game.location.is_empty() {
                body.push_str(&format!(", {}", escape(&game.location)));
            }
            body.push_str("</p>\n");
        }
        body.push_str(&format!(
            "<p><a href=\"/game/{}\">Box score</a></p>\n</div>\n",
            escape(&game.id)
        ));
    }

    layout("Scores", &body)
}

/// Away row over home row, with per-period columns when available.
fn score_table(away: &TeamLine, home: &TeamLine) -> String {
    let periods = away.periods.len().max(home.periods.len());
    let mut html = String::from("<table>\n<tr><th>Team</th>");
    let labels =
        if home.periods.len() >= away.periods.len() { &home.periods } else { &away.periods };
    for p in labels {
        html.push_str(&format!("<th>{}</th>", escape(&p.label)));
    }
    html.push_str("<th>T</th></tr>\n");

    for line in [away, home] {
        let class = if line.won { " class=\"won\"" } else { "" };
        html.push_str(&format!(
            "<tr{class}><td><img class=\"logo-sm\" src=\"{}\" alt=\"\"> {}</td>",
            escape(&line.logo_url),
            escape(&line.name),
        ));
        for i in 0..periods {
            let points = line.periods.get(i).map(|p| p.points.to_string()).unwrap_or_default();
            html.push_str(&format!("<td>{points}</td>"));
        }
        html.push_str(&format!("<td>{}</td></tr>\n", line.score));
    }
    html.push_str("</table>\n");
    html
}

pub fn statistics_page(leaders: Result<&LeagueLeaders, &str>) -> String {
    let body = match leaders {
        Err(message) => format!("<p class=\"error\">{}</p>\n", escape(message)),
        Ok(leaders) if leaders.categories.is_empty() => {
            "<p>No league leaders are available yet.</p>\n".to_string()
        }
        Ok(leaders) => {
            let mut body = format!("<p>Season: {}</p>\n", escape(&leaders.season));
            for category in &leaders.categories {
                body.push_str(&format!(
                    "<h2>{} <small>({})</small></h2>\n<table>\n\
                     <tr><th>Rank</th><th>Player</th><th>Pos</th><th>Team</th>\
                     <th>Value</th></tr>\n",
                    escape(&category.name),
                    escape(&category.kind),
                ));
                for leader in &category.leaders {
                    body.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td></tr>\n",
                        leader.rank,
                        escape(&leader.player),
                        escape(&leader.position),
                        escape(&leader.team),
                        leader.score,
                    ));
                }
                body.push_str("</table>\n");
            }
            body
        }
    };
    layout("Statistics", &body)
}

pub fn game_page(game: &GameDetail) -> String {
    let mut status = escape(game.status.label());
    if let Some(quarter) = game.quarter.filter(|_| !game.status.is_final()) {
        status.push_str(&format!(" &middot; Q{quarter} {}", escape(&game.clock)));
    }
    let mut body = format!(
        "<p class=\"status\">{status}</p>\n<p>{} {} &middot; {}",
        escape(&game.date),
        escape(&game.time),
        escape(&game.venue.name),
    );
    let location = game.venue.location();
    if !location.is_empty() {
        body.push_str(&format!(", {}", escape(&location)));
    }
    body.push_str("</p>\n");

    body.push_str(&score_table(&game.away.team, &game.home.team));
    body.push_str(&box_score(&game.away));
    body.push_str(&box_score(&game.home));

    layout(&game.title(), &body)
}

fn box_score(side: &BoxScore) -> String {
    let mut html = format!(
        "<h2>{}</h2>\n<table>\n<tr><th>Player</th><th>Pos</th><th>MIN</th><th>PTS</th>\
         <th>REB</th><th>AST</th></tr>\n",
        escape(&side.team.name)
    );
    for p in &side.players {
        let name = if p.starter { format!("{}*", escape(&p.name)) } else { escape(&p.name) };
        html.push_str(&format!(
            "<tr><td>{name}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&p.position),
            escape(&p.minutes),
            p.points,
            p.rebounds,
            p.assists,
        ));
    }
    html.push_str("</table>\n");
    html
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or("Error"));
    let body = format!(
        "<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to home</a></p>\n",
        escape(message)
    );
    layout(&title, &body)
}

/// 1 -> "1st", 12 -> "12th", 22 -> "22nd"
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
