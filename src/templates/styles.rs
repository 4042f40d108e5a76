//! CSS styles for the editor page.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --red: #dc322f;
    --blue: #268bd2;
    --green: #859900;
    --yellow: #b58900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --highlight: #f7f2e2;
}

* { box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    background: var(--bg);
    color: var(--fg);
    margin: 0;
    padding-top: 6rem;
}

h1 {
    text-align: center;
    font-size: 1.9rem;
    margin-bottom: 2rem;
    color: var(--base01);
}

.card {
    position: relative;
    width: 24rem;
    margin: 0 auto;
    padding: 1.5rem;
    background: white;
    border-radius: 8px;
    border: 1px solid var(--border);
}

.card h2 {
    margin: 0;
    font-size: 1.9rem;
    color: var(--base01);
}

.last-update {
    font-size: 0.85rem;
    color: var(--muted);
}

textarea#note {
    width: 100%;
    height: 11rem;
    margin-top: 1.5rem;
    padding: 0.5rem;
    border: 1px solid var(--border);
    border-radius: 6px;
    font: inherit;
    color: var(--base01);
    resize: vertical;
}

.mention-list {
    margin-top: 0.25rem;
    max-height: 11rem;
    overflow-y: auto;
    border: 1px solid var(--border);
    border-radius: 6px;
}

.mention-item {
    padding: 0.25rem 0.5rem;
    cursor: pointer;
    text-transform: capitalize;
}

.mention-item:hover { background: var(--highlight); }

.save-status {
    margin-top: 0.5rem;
    font-size: 0.8rem;
    color: var(--muted);
}

.save-status.saving { color: var(--yellow); }
.save-status.saved { color: var(--green); }
.save-status.failed { color: var(--red); }

.banner {
    text-align: center;
    padding: 1rem;
}

.banner.error { color: var(--red); }

.hidden { display: none; }
"#;
