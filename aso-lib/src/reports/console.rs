use super::{AppKeywords, Report};
use crate::Result;
use crate::scores::{KeywordScores, Visibility};
use crate::suggest::SuggestedKeyword;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Width of the label column in breakdowns.
const LABEL_WIDTH: usize = 16;

pub fn generate<W: Write>(report: &Report<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    match report {
        Report::Scores(scores) => write_scores(scores, use_colors, writer),
        Report::Visibility(visibility) => write_visibility(visibility, use_colors, writer),
        Report::Suggestions(suggestions) => write_suggestions(suggestions, use_colors, writer),
        Report::Keywords(keywords) => write_keywords(keywords, use_colors, writer),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors { text.bold().to_string() } else { text.to_string() }
}

/// A score right-aligned in a fixed-width cell, highlighted when colors are on.
fn score(value: f64, use_colors: bool) -> String {
    let text = format!("{value:>7.2}");
    if use_colors { text.cyan().bold().to_string() } else { text }
}

fn line<W: Write>(writer: &mut W, label: &str, value: f64, detail: &str, use_colors: bool) -> Result<()> {
    if detail.is_empty() {
        writeln!(writer, "  {label:<LABEL_WIDTH$}{}", score(value, use_colors))?;
    } else {
        writeln!(writer, "  {label:<LABEL_WIDTH$}{}   {detail}", score(value, use_colors))?;
    }
    Ok(())
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| value.to_string())
}

fn write_scores<W: Write>(scores: &KeywordScores, use_colors: bool, writer: &mut W) -> Result<()> {
    let difficulty = &scores.difficulty;
    let traffic = &scores.traffic;

    writeln!(writer, "Keyword '{}'", scores.keyword)?;
    writeln!(writer)?;

    writeln!(writer, "{} {}", heading("Difficulty", use_colors), score(difficulty.score, use_colors))?;
    let titles = &difficulty.title_matches;
    line(
        writer,
        "title matches",
        titles.score,
        &format!("exact {}, broad {}, partial {}, none {}", titles.exact, titles.broad, titles.partial, titles.none),
        use_colors,
    )?;
    line(writer, "competitors", difficulty.competitors.score, &format!("{} apps", difficulty.competitors.count), use_colors)?;
    line(writer, "installs", difficulty.installs.score, &format!("avg {:.0}", difficulty.installs.avg), use_colors)?;
    line(writer, "rating", difficulty.rating.score, &format!("avg {:.2}", difficulty.rating.avg), use_colors)?;
    line(
        writer,
        "age",
        difficulty.age.score,
        &format!("avg {:.0} days since update", difficulty.age.avg_days_since_updated),
        use_colors,
    )?;

    writeln!(writer)?;
    writeln!(writer, "{}    {}", heading("Traffic", use_colors), score(traffic.score, use_colors))?;
    let suggest = &traffic.suggest;
    let suggest_detail = match (suggest.length, suggest.priority) {
        (Some(length), _) => format!("prefix length {length}, position {}", optional(suggest.index)),
        (None, Some(priority)) => format!("priority {priority:.0}"),
        (None, None) => "not suggested".to_string(),
    };
    line(writer, "suggest", suggest.score, &suggest_detail, use_colors)?;
    line(
        writer,
        "ranked",
        traffic.ranked.score,
        &format!(
            "{} apps, avg rank {}",
            traffic.ranked.count,
            traffic.ranked.avg_rank.map_or_else(|| "n/a".to_string(), |rank| format!("{rank:.1}"))
        ),
        use_colors,
    )?;
    line(writer, "installs", traffic.installs.score, &format!("avg {:.0}", traffic.installs.avg), use_colors)?;
    line(writer, "length", traffic.length.score, &format!("{} characters", traffic.length.length), use_colors)?;

    Ok(())
}

fn write_visibility<W: Write>(visibility: &Visibility, use_colors: bool, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "{} of '{}' {}",
        heading("Visibility", use_colors),
        visibility.app_id,
        score(visibility.score, use_colors)
    )?;

    writeln!(writer)?;
    if visibility.keywords.is_empty() {
        writeln!(writer, "  Not ranked for any of its keywords")?;
    } else {
        let width = visibility
            .keywords
            .iter()
            .map(|keyword| keyword.keyword.chars().count())
            .max()
            .unwrap_or(0)
            .max(LABEL_WIDTH);

        for keyword in &visibility.keywords {
            writeln!(
                writer,
                "  {:<width$}{}   rank {}, traffic {:.2}",
                keyword.keyword,
                score(keyword.score, use_colors),
                keyword.rank,
                keyword.traffic,
            )?;
        }
    }

    writeln!(writer)?;
    let global = &visibility.collections.global;
    let category = &visibility.collections.category;
    line(writer, "global chart", global.score, &format!("rank {}", optional(global.rank)), use_colors)?;
    line(writer, "category chart", category.score, &format!("rank {}", optional(category.rank)), use_colors)?;

    Ok(())
}

fn write_suggestions<W: Write>(suggestions: &[SuggestedKeyword], use_colors: bool, writer: &mut W) -> Result<()> {
    if suggestions.is_empty() {
        writeln!(writer, "No keywords to suggest")?;
        return Ok(());
    }

    let width = suggestions.iter().map(|keyword| keyword.keyword.chars().count()).max().unwrap_or(0);
    for suggestion in suggestions {
        let count = suggestion.count.to_string();
        let count = if use_colors { count.cyan().to_string() } else { count };
        writeln!(writer, "{:<width$}  {count}", suggestion.keyword)?;
    }

    Ok(())
}

fn write_keywords<W: Write>(keywords: &AppKeywords<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    writeln!(writer, "{} of '{}'", heading("Keywords", use_colors), keywords.app_id)?;
    for (index, keyword) in keywords.keywords.iter().enumerate() {
        writeln!(writer, "{:>4}. {keyword}", index + 1)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures;

    fn render(report: &Report<'_>) -> String {
        let mut output = String::new();
        generate(report, false, &mut output).unwrap();
        output
    }

    #[test]
    fn test_scores_breakdown() {
        let scores = fixtures::keyword_scores();
        let output = render(&Report::Scores(&scores));

        assert!(output.starts_with("Keyword 'todo list'\n"));
        assert!(output.contains("Difficulty    6.71"));
        assert!(output.contains("exact 6, broad 2, partial 1, none 1"));
        assert!(output.contains("prefix length 3, position 0"));
        assert!(output.contains("2 apps, avg rank 12.5"));
        assert!(output.contains("9 characters"));
    }

    #[test]
    fn test_visibility_lists_ranked_keywords() {
        let visibility = fixtures::visibility();
        let output = render(&Report::Visibility(&visibility));

        assert!(output.contains("Visibility of 'com.example.todo'  176.14"));
        assert!(output.contains("rank 3, traffic 8.00"));
        assert!(output.contains("rank n/a"));
        assert!(output.contains("rank 5"));
    }

    #[test]
    fn test_suggestions_aligned() {
        let suggestions = fixtures::suggestions();
        let output = render(&Report::Suggestions(&suggestions));
        assert_eq!(output, "task manager  7\nreminders     5\n");

        assert_eq!(render(&Report::Suggestions(&[])), "No keywords to suggest\n");
    }

    #[test]
    fn test_keywords_numbered() {
        let keywords = ["todo".to_string(), "tasks".to_string()];
        let output = render(&Report::Keywords(AppKeywords {
            app_id: "todo",
            keywords: &keywords,
        }));
        assert_eq!(output, "Keywords of 'todo'\n   1. todo\n   2. tasks\n");
    }

    #[test]
    fn test_colors_add_escapes() {
        let suggestions = fixtures::suggestions();
        let mut output = String::new();
        generate(&Report::Suggestions(&suggestions), true, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
    }
}
