//! Embedded HTML/CSS/JS frontend for the dashboard.
//!
//! The whole page is compiled into the binary as a string constant; the only
//! external asset is the Plotly bundle that turns the renderer-independent
//! chart specs from `/api/*` into drawn charts.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>COVID-19 Dashboard</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js" charset="utf-8"></script>
<style>
:root {
  --bg: #f6f8fa;
  --surface: #ffffff;
  --border: #d0d7de;
  --text: #1f2328;
  --text-muted: #59636e;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app {
  max-width: 1100px;
  margin: 0 auto;
  padding: 24px;
}

h1, h2 {
  text-align: center;
  font-weight: 600;
  margin-bottom: 16px;
}

h2 {
  margin-top: 32px;
  padding-top: 16px;
  border-top: 1px solid var(--border);
}

.selector {
  display: flex;
  align-items: center;
  gap: 10px;
  margin-bottom: 16px;
}

.selector label {
  color: var(--text-muted);
}

.selector select {
  flex: 1;
  max-width: 360px;
  padding: 6px 8px;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  background: var(--surface);
  font-family: var(--font);
  font-size: 14px;
}

.chart {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  margin-bottom: 16px;
  min-height: 360px;
}
</style>
</head>
<body>
<div class="app">
  <h1 id="page-title">COVID-19 Dashboard</h1>

  <div class="selector">
    <label for="country-select">Select Country:</label>
    <select id="country-select"></select>
  </div>

  <div class="chart" id="cases-chart"></div>
  <div class="chart" id="deaths-chart"></div>
  <div class="chart" id="stringency-chart"></div>

  <h2>Global Comparisons</h2>
  <div class="chart" id="world-map"></div>
  <div class="chart" id="stringency-scatter"></div>
</div>

<script>
"use strict";

const el = (id) => document.getElementById(id);

async function fetchJson(url) {
  const res = await fetch(url);
  if (!res.ok) throw new Error(`${url}: HTTP ${res.status}`);
  return res.json();
}

function traceFor(spec) {
  const xs = spec.points.map((p) => p.x);
  const ys = spec.points.map((p) => p.y);
  if (spec.kind === "choropleth") {
    return {
      type: "choropleth",
      locations: xs,
      z: ys,
      locationmode: "country names",
      colorbar: { title: { text: spec.y_label } },
    };
  }
  if (spec.kind === "scatter") {
    return {
      type: "scatter",
      mode: "markers",
      x: xs,
      y: ys,
      text: spec.points.map((p) => p.label || ""),
    };
  }
  return { type: "scatter", mode: "lines", x: xs, y: ys };
}

function render(id, spec) {
  const layout = {
    title: { text: spec.title },
    margin: { t: 48, r: 24, b: 48, l: 56 },
  };
  if (spec.kind === "choropleth") {
    layout.geo = { projection: { type: "natural earth" } };
  } else {
    layout.xaxis = { title: { text: spec.x_label } };
    layout.yaxis = { title: { text: spec.y_label } };
  }
  Plotly.react(el(id), [traceFor(spec)], layout, {
    displayModeBar: false,
    responsive: true,
  });
}

function renderCountryCharts(charts) {
  render("cases-chart", charts.cases);
  render("deaths-chart", charts.deaths);
  render("stringency-chart", charts.stringency);
}

async function showCountry(name) {
  renderCountryCharts(await fetchJson(`/api/country/${encodeURIComponent(name)}`));
}

async function init() {
  const view = await fetchJson("/api/dashboard");
  document.title = view.title;
  el("page-title").textContent = view.title;

  const select = el("country-select");
  for (const country of view.countries) {
    const option = document.createElement("option");
    option.value = country;
    option.textContent = country;
    select.appendChild(option);
  }
  select.value = view.selected_country;
  select.addEventListener("change", () => showCountry(select.value));

  // Chart slots start empty; the two global charts are served precomputed.
  renderCountryCharts(view.country_charts);
  render("world-map", view.choropleth);
  render("stringency-scatter", view.scatter);

  // First update cycle for the pre-selected country.
  await showCountry(select.value);
}

init().catch((err) => console.error("dashboard failed to initialise", err));
</script>
</body>
</html>
"##;
