//! Completion-time estimate shown next to the scrape inputs.

/// Assumed scrape cost of a single post.
pub const SECONDS_PER_POST: u64 = 10;

/// Comma-separated subreddit names, trimmed, empties dropped.
pub fn parse_subreddits(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Lenient integer parse: leading whitespace, an optional sign, then as many
/// digits as are present. Anything else yields `None`. Digit runs too long for
/// an `i64` saturate.
pub fn parse_post_count(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value = rest[..digits_len].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Estimated scrape duration in seconds; 0 when either input is empty or the
/// post count does not parse to a positive number.
pub fn estimate_seconds(subreddits: &str, num_posts: &str) -> u64 {
    if subreddits.is_empty() || num_posts.is_empty() {
        return 0;
    }
    let names = parse_subreddits(subreddits).len() as i64;
    let posts = parse_post_count(num_posts).unwrap_or(0);
    let total = names
        .saturating_mul(posts)
        .saturating_mul(SECONDS_PER_POST as i64);
    u64::try_from(total).unwrap_or(0)
}

pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        let remaining = seconds % 60;
        if remaining > 0 {
            format!("{}min {}s", minutes, remaining)
        } else {
            format!("{}min", minutes)
        }
    } else {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        if minutes > 0 {
            format!("{}hr {}min", hours, minutes)
        } else {
            format!("{}hr", hours)
        }
    }
}

pub fn estimated_time(subreddits: &str, num_posts: &str) -> String {
    match estimate_seconds(subreddits, num_posts) {
        0 => "0min".to_string(),
        seconds => format_duration(seconds),
    }
}

pub fn estimated_time_label(subreddits: &str, num_posts: &str) -> String {
    format!(
        "Estimated Completion Time: {}",
        estimated_time(subreddits, num_posts)
    )
}
