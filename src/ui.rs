use crate::stats::DerivedViews;
use crate::stats::goal::GoalProgress;

pub fn render_index(views: &DerivedViews, goal: Option<&GoalProgress>) -> String {
    let notable = views
        .most_notable
        .map_or_else(|| "None yet".to_string(), |a| a.name.to_string());
    let goal_text = goal.map_or_else(
        || "No goal set for this month".to_string(),
        |g| format!("{} / {} words ({:.1}%)", group(g.current), group(g.target), g.progress_pct),
    );

    INDEX_HTML
        .replace("{{TODAY}}", &views.today.to_string())
        .replace("{{WORDS}}", &group(views.cumulative.word_count))
        .replace("{{BOOKS}}", &group(views.cumulative.book_count))
        .replace("{{CHAPTERS}}", &group(views.cumulative.chapter_count))
        .replace("{{LEVEL}}", &views.level.level.to_string())
        .replace("{{LEVEL_PCT}}", &format!("{:.1}", views.level.progress_pct))
        .replace("{{STREAK}}", &views.streaks.current.to_string())
        .replace("{{LONGEST}}", &views.streaks.longest.to_string())
        .replace("{{NOTABLE}}", &notable)
        .replace("{{GOAL}}", &goal_text)
}

/// `1234567` -> `1,234,567`
fn group(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Reading Stats</title>
  <style>
    :root {
      --bg: #14161c;
      --card: #1e2129;
      --ink: #e8e6e1;
      --muted: #8c8f99;
      --accent: #6c8cff;
      --accent-2: #f2b84b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    .stat .value.warm {
      color: var(--accent-2);
    }

    .chart-card {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
    }

    .chart-card h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .chart-bar {
      fill: var(--accent);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .heatmap {
      display: grid;
      grid-template-rows: repeat(7, 11px);
      grid-auto-flow: column;
      grid-auto-columns: 11px;
      gap: 3px;
      overflow-x: auto;
    }

    .cell {
      border-radius: 2px;
      background: #2a2d36;
    }

    .cell[data-level="1"] { background: rgba(108, 140, 255, 0.25); }
    .cell[data-level="2"] { background: rgba(108, 140, 255, 0.45); }
    .cell[data-level="3"] { background: rgba(108, 140, 255, 0.7); }
    .cell[data-level="4"] { background: var(--accent); }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Reading Stats</h1>
      <p class="subtitle">As of {{TODAY}}. Data trails real time by a few days.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Words read</span>
        <span class="value">{{WORDS}}</span>
      </div>
      <div class="stat">
        <span class="label">Works</span>
        <span class="value">{{BOOKS}}</span>
      </div>
      <div class="stat">
        <span class="label">Chapters</span>
        <span class="value">{{CHAPTERS}}</span>
      </div>
      <div class="stat">
        <span class="label">Level</span>
        <span class="value warm">{{LEVEL}} <small>({{LEVEL_PCT}}%)</small></span>
      </div>
      <div class="stat">
        <span class="label">Current streak</span>
        <span class="value">{{STREAK}} days</span>
      </div>
      <div class="stat">
        <span class="label">Longest streak</span>
        <span class="value">{{LONGEST}} days</span>
      </div>
      <div class="stat">
        <span class="label">Top achievement</span>
        <span class="value warm">{{NOTABLE}}</span>
      </div>
      <div class="stat">
        <span class="label">This month's goal</span>
        <span class="value">{{GOAL}}</span>
      </div>
    </section>

    <section class="chart-card">
      <h2>Last 12 months</h2>
      <svg id="chart" viewBox="0 0 600 240" aria-label="Words per month" role="img"></svg>
    </section>

    <section class="chart-card">
      <h2>Activity</h2>
      <div id="heatmap" class="heatmap"></div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');
    const heatmapEl = document.getElementById('heatmap');

    const renderBars = (points) => {
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }
      const width = 600;
      const height = 240;
      const padding = 30;
      const max = Math.max(...points.map((p) => p.word_count), 1);
      const slot = (width - padding * 2) / points.length;
      chartEl.innerHTML = points
        .map((p, i) => {
          const h = ((height - padding * 2) * p.word_count) / max;
          const x = padding + i * slot + slot * 0.15;
          const y = height - padding - h;
          return `<rect class="chart-bar" x="${x}" y="${y}" width="${slot * 0.7}" height="${h}" rx="3" />` +
            `<text class="chart-label" x="${x + slot * 0.35}" y="${height - padding + 16}" text-anchor="middle">${p.label}</text>`;
        })
        .join('');
    };

    const renderHeatmap = (days) => {
      heatmapEl.innerHTML = days
        .map((d) => `<div class="cell" data-level="${d.intensity}" title="${d.date}: ${d.words}"></div>`)
        .join('');
    };

    const load = async () => {
      const [stats, calendar] = await Promise.all([
        fetch('/api/stats').then((res) => (res.ok ? res.json() : Promise.reject(new Error('Unable to load stats')))),
        fetch('/api/calendar').then((res) => (res.ok ? res.json() : Promise.reject(new Error('Unable to load calendar'))))
      ]);
      renderBars(stats.recent_months);
      renderHeatmap(calendar);
    };

    load().catch((err) => {
      statusEl.textContent = err.message;
    });
  </script>
</body>
</html>
"#;
