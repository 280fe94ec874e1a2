//! Host page served by [`RelayServer`](crate::RelayServer).
//!
//! The composed document goes into the `srcdoc` of an iframe sandboxed with
//! `allow-scripts allow-modals` and without `allow-same-origin`, so it runs
//! in an opaque origin and cannot touch the host page. The host listens for
//! `message` events, accepts only those whose source is the preview frame
//! and whose payload has the relay shape, and POSTs them to `/relay`.

use crate::escape::escape_html;
use crate::relay::RELAY_CHANNEL;

/// Path the host page posts relay messages to.
pub const RELAY_PATH: &str = "/relay";

const LISTENER_TEMPLATE: &str = r"(function () {
  var frame = document.getElementById('preview');
  var out = document.getElementById('output');
  var LEVELS = ['info', 'warn', 'error'];
  function show(level, message) {
    var line = document.createElement('div');
    line.className = level;
    line.textContent = '[' + new Date().toLocaleTimeString() + '] ' + message;
    out.appendChild(line);
    out.scrollTop = out.scrollHeight;
  }
  window.addEventListener('message', function (event) {
    if (event.source !== frame.contentWindow) return;
    var data = event.data;
    if (!data || data.channel !== '__CHANNEL__') return;
    if (LEVELS.indexOf(data.level) < 0 || typeof data.message !== 'string') return;
    show(data.level, data.message);
    fetch('__RELAY_PATH__', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ channel: data.channel, level: data.level, message: data.message })
    }).catch(function () {});
  });
  document.getElementById('rerun').addEventListener('click', function () { location.reload(); });
  document.getElementById('clear').addEventListener('click', function () { out.textContent = ''; });
})();";

/// Render the host page around a composed document.
#[must_use]
pub fn render(document: &str, title: &str) -> String {
    let listener = LISTENER_TEMPLATE
        .replace("__CHANNEL__", RELAY_CHANNEL)
        .replace("__RELAY_PATH__", RELAY_PATH);

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body{{margin:0;font-family:system-ui;display:flex;flex-direction:column;height:100vh;background:#0f172a;color:#e2e8f0}}
header{{display:flex;gap:8px;align-items:center;padding:8px 12px}}
iframe{{flex:1;border:0;background:#fff}}
#output{{height:28vh;overflow:auto;font-family:monospace;padding:8px 12px;border-top:1px solid #334155}}
.warn{{color:#fbbf24}}.error{{color:#f87171}}.info{{color:#60a5fa}}
</style>
</head>
<body>
<header><strong>{title}</strong><button id="rerun">Rerun</button><button id="clear">Clear log</button></header>
<iframe id="preview" sandbox="allow-scripts allow-modals" srcdoc="{srcdoc}"></iframe>
<div id="output"></div>
<script>
{listener}
</script>
</body>
</html>
"#,
        title = escape_html(title),
        srcdoc = escape_html(document),
    )
}
