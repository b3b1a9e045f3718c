//! Parsers for command-line color and coordinate descriptors.

use palette_index::Rgb;

/// Parse `"R,G,B"` (spaces and an optional `rgb(...)` wrapper allowed).
pub fn parse_rgb_triple(s: &str) -> Result<Rgb, String> {
    let inner = s.trim();
    let inner = inner
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(inner);

    let channels: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [r, g, b] = channels.as_slice() else {
        return Err(format!("expected R,G,B, got {s:?}"));
    };

    let channel = |v: &str| {
        v.parse::<u8>()
            .map_err(|_| format!("channel {v:?} is not an integer in 0..=255"))
    };
    Ok(Rgb::new(channel(r)?, channel(g)?, channel(b)?))
}

/// Parse a canvas offset `"X,Y"`; either component may be negative.
pub fn parse_origin(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid X offset {x:?}"))?;
    let y = y
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid Y offset {y:?}"))?;
    Ok((x, y))
}
