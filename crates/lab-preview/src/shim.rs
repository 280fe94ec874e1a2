//! Console relay shim.
//!
//! Installed as the first script of every composed document. It wraps
//! `console.log`/`warn`/`error` so each call still reaches the native console
//! and is additionally forwarded to the embedding page with
//! `parent.postMessage`, the only channel an opaque-origin iframe has to its
//! parent. A `window.onerror` handler forwards uncaught errors as
//! `Error: <message> (Line <line>)`. Forwarding failures are swallowed.

use crate::relay::RELAY_CHANNEL;

const SHIM_TEMPLATE: &str = r"(function () {
  var CHANNEL = '__CHANNEL__';
  function forward(level, args) {
    try {
      parent.postMessage({ channel: CHANNEL, level: level, message: args.join(' ') }, '*');
    } catch (e) {}
  }
  [['log', 'info'], ['warn', 'warn'], ['error', 'error']].forEach(function (pair) {
    var method = pair[0];
    var level = pair[1];
    var original = console[method];
    console[method] = function () {
      var args = Array.prototype.slice.call(arguments);
      try { original.apply(console, args); } catch (e) {}
      forward(level, args);
    };
  });
  window.onerror = function (msg, url, line) {
    forward('error', ['Error: ' + msg + ' (Line ' + line + ')']);
  };
})();";

/// The shim source, without surrounding `<script>` tags.
#[must_use]
pub fn script() -> String {
    SHIM_TEMPLATE.replace("__CHANNEL__", RELAY_CHANNEL)
}
