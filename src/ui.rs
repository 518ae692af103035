use crate::chart::{STRIKE_SURFACE, VELOCITY_SURFACE};

pub fn render_index() -> String {
    INDEX_HTML
        .replace("{{VELOCITY_SURFACE}}", VELOCITY_SURFACE)
        .replace("{{STRIKE_SURFACE}}", STRIKE_SURFACE)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Pitch Trends</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f1ea;
      --bg-2: #cfe0d4;
      --ink: #22272b;
      --accent: #d22d49;
      --accent-2: #1d4ed8;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(34, 39, 43, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e8efe6 60%, #f6f4ee 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      align-items: center;
      justify-content: space-between;
    }

    select {
      font: inherit;
      padding: 12px 16px;
      border-radius: 14px;
      border: 1px solid rgba(34, 39, 43, 0.18);
      min-width: 240px;
      background: white;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(34, 39, 43, 0.08);
      border-radius: 999px;
    }

    .tab {
      appearance: none;
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font: inherit;
      font-size: 0.9rem;
      font-weight: 600;
      color: #6b645d;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(34, 39, 43, 0.12);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(34, 39, 43, 0.08);
      display: grid;
      gap: 8px;
    }

    .chart-card h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .chart-card svg {
      width: 100%;
      height: 280px;
      display: block;
    }

    .chart-grid {
      stroke: rgba(34, 39, 43, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Pitch Trends</h1>
      <p class="subtitle">Daily average effective velocity and strike rate for one pitcher.</p>
    </header>

    <section class="controls">
      <select id="pitcherSelect" aria-label="Pitcher"></select>
      <div class="tabs" role="tablist">
        <button class="tab active" type="button" data-filter="all" role="tab" aria-selected="true">All fetched</button>
        <button class="tab" type="button" data-filter="pitcher" role="tab" aria-selected="false">Selected only</button>
      </div>
    </section>

    <section class="chart-card" data-surface="{{VELOCITY_SURFACE}}">
      <h2>Velocity</h2>
      <svg id="{{VELOCITY_SURFACE}}" viewBox="0 0 600 280" role="img" aria-label="Velocity chart"></svg>
    </section>

    <section class="chart-card" data-surface="{{STRIKE_SURFACE}}">
      <h2>Strike %</h2>
      <svg id="{{STRIKE_SURFACE}}" viewBox="0 0 600 280" role="img" aria-label="Strike percentage chart"></svg>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Days use the game date as recorded. Pitches without a plausible velocity (0 to 150 mph) are left out.</p>
  </main>

  <script>
    const selectEl = document.getElementById('pitcherSelect');
    const statusEl = document.getElementById('status');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const axisRange = (values, bounds) => {
      let min = bounds.min ?? Math.min(...values, bounds.suggestedMin ?? Infinity);
      let max = bounds.max ?? Math.max(...values, bounds.suggestedMax ?? -Infinity);
      if (!Number.isFinite(min) || !Number.isFinite(max)) {
        min = 0;
        max = 1;
      }
      if (min === max) {
        min -= 1;
        max += 1;
      }
      return [min, max];
    };

    const drawChart = (svg, spec) => {
      if (!spec || !spec.labels.length) {
        svg.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const dataset = spec.datasets[0];
      const width = 600;
      const height = 280;
      const paddingX = 48;
      const paddingY = 36;
      const top = 20;
      const [min, max] = axisRange(dataset.data, spec.scales.y);
      const xStep = spec.labels.length > 1 ? (width - paddingX * 2) / (spec.labels.length - 1) : 0;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - ((value - min) / (max - min)) * (height - top - paddingY);

      const line = dataset.data
        .map((value, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(value).toFixed(2)}`)
        .join(' ');
      const area = `${line} L ${x(dataset.data.length - 1)} ${y(min)} L ${x(0)} ${y(min)} Z`;

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = min + ((max - min) * i) / 4;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${value.toFixed(1)}</text>`;
      }

      const every = Math.max(1, Math.ceil(spec.labels.length / 8));
      const labels = spec.labels
        .map((label, index) => index % every === 0
          ? `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${label.slice(5)}</text>`
          : '')
        .join('');
      const points = dataset.data
        .map((value, index) => `<circle cx="${x(index)}" cy="${y(value)}" r="${dataset.pointRadius}" fill="${dataset.pointBackgroundColor}"><title>${spec.labels[index]}: ${value}</title></circle>`)
        .join('');

      svg.innerHTML = `
        ${grid}
        ${dataset.fill ? `<path d="${area}" fill="${dataset.backgroundColor}" />` : ''}
        <path d="${line}" fill="none" stroke="${dataset.borderColor}" stroke-width="${dataset.borderWidth}" />
        ${points}
        ${labels}
        <text class="chart-label" x="${paddingX}" y="12">${spec.scales.y.title}</text>
      `;
    };

    const showCharts = (view) => {
      document.querySelectorAll('.chart-card').forEach((card) => {
        const surface = card.dataset.surface;
        if (!(surface in view.charts)) {
          card.hidden = true;
          return;
        }
        drawChart(document.getElementById(surface), view.charts[surface]);
      });
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const setActiveTab = (filter) => {
      tabs.forEach((button) => {
        const isActive = button.dataset.filter === filter;
        button.classList.toggle('active', isActive);
        button.setAttribute('aria-selected', String(isActive));
      });
    };

    const loadPlayers = async () => {
      const res = await fetch('/api/players');
      if (!res.ok) {
        throw new Error('Unable to load pitchers');
      }
      const players = await res.json();
      selectEl.innerHTML = '';
      players.forEach((player) => {
        const opt = document.createElement('option');
        opt.value = player.id;
        opt.textContent = player.name;
        selectEl.appendChild(opt);
      });
    };

    const loadCharts = async () => {
      const res = await fetch('/api/charts');
      if (res.ok) {
        showCharts(await res.json());
      }
    };

    selectEl.addEventListener('change', () => {
      if (!selectEl.value) {
        return;
      }
      setStatus('Loading...', 'info');
      post('/api/select', { player: selectEl.value })
        .then((view) => {
          setActiveTab('all');
          showCharts(view);
          setStatus('', '');
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        const pitcher = button.dataset.filter === 'all' ? 'all' : selectEl.value;
        post('/api/filter', { pitcher })
          .then((view) => {
            setActiveTab(button.dataset.filter);
            showCharts(view);
          })
          .catch((err) => setStatus(err.message, 'error'));
      });
    });

    Promise.all([loadPlayers(), loadCharts()]).catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_names_both_surfaces() {
        let html = render_index();
        assert!(html.contains(r#"id="velocityChart""#));
        assert!(html.contains(r#"id="strikeChart""#));
        assert!(!html.contains("{{"));
    }
}
