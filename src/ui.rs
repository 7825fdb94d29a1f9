use crate::models::TrackerView;

pub fn render_index(view: &TrackerView) -> String {
    let settings = &view.settings;
    let (message, message_class) = match &view.message {
        Some(text) => (escape(text), "celebration"),
        None => (String::new(), "celebration hidden"),
    };

    INDEX_HTML
        .replace("{{GRID}}", &render_grid(view))
        .replace("{{SUMMARY}}", &escape(&view.summary))
        .replace("{{GOAL_LABEL}}", &escape(&view.goal_label))
        .replace("{{PERCENT}}", &format!("{:.2}", view.percent))
        .replace("{{MESSAGE}}", &message)
        .replace("{{MESSAGE_CLASS}}", message_class)
        .replace("{{GOAL}}", &settings.goal.to_string())
        .replace("{{STEP}}", &settings.step.to_string())
        .replace("{{INTERVAL}}", &settings.confetti_interval.to_string())
        .replace(
            "{{CONFETTI_CHECKED}}",
            if settings.confetti_enabled { "checked" } else { "" },
        )
        .replace("{{CONFETTI_ENABLED}}", &settings.confetti_enabled.to_string())
}

fn render_grid(view: &TrackerView) -> String {
    let mut out = String::new();
    for (position, item) in view.boxes.iter().enumerate() {
        let (class, checked) = if item.checked {
            ("saving-item checked", " checked")
        } else {
            ("saving-item", "")
        };
        out.push_str(&format!(
            r#"<div class="{class}"><input type="checkbox" id="saving-{value}" data-position="{position}"{checked} /><label for="saving-{value}">{label}</label></div>"#,
            value = item.value,
            label = escape(&item.label),
        ));
        out.push('\n');
    }
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="no">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sparemål</title>
  <style>
    :root {
      --bg: #f1f5f9;
      --ink: #0f172a;
      --muted: #64748b;
      --accent: #2563eb;
      --accent-soft: #dbeafe;
      --done: #22c55e;
      --card: #ffffff;
      --shadow: 0 20px 50px rgba(15, 23, 42, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
      overflow-x: hidden;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 4vw, 2.2rem);
    }

    .goal {
      color: var(--muted);
      margin: 4px 0 0;
    }

    .icon-btn {
      border: none;
      background: var(--accent-soft);
      color: var(--accent);
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
    }

    .summary {
      font-weight: 600;
      white-space: pre;
    }

    .progress {
      height: 14px;
      border-radius: 999px;
      background: #e2e8f0;
      overflow: hidden;
    }

    .progress-bar {
      height: 100%;
      background: linear-gradient(90deg, var(--accent), var(--done));
      transition: width 300ms ease;
    }

    .celebration {
      padding: 14px 18px;
      border-radius: 16px;
      background: #dcfce7;
      color: #166534;
      font-weight: 600;
      text-align: center;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(120px, 1fr));
      gap: 10px;
    }

    .saving-item {
      display: flex;
      align-items: center;
      gap: 8px;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid #e2e8f0;
      transition: background 150ms ease;
    }

    .saving-item.checked {
      background: var(--accent-soft);
      border-color: var(--accent);
    }

    .saving-item label {
      cursor: pointer;
      font-variant-numeric: tabular-nums;
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(15, 23, 42, 0.45);
      display: grid;
      place-items: center;
      padding: 18px;
    }

    .modal {
      background: var(--card);
      border-radius: 20px;
      padding: 24px;
      width: min(420px, 100%);
      display: grid;
      gap: 14px;
    }

    .modal h2 {
      margin: 0;
    }

    .modal label {
      display: grid;
      gap: 6px;
      font-size: 0.95rem;
    }

    .modal label.inline {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .modal input[type="number"] {
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid #cbd5e1;
      font-size: 1rem;
    }

    .modal-actions {
      display: flex;
      justify-content: flex-end;
      gap: 10px;
    }

    .modal-actions button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      cursor: pointer;
    }

    #settings-save {
      background: var(--accent);
      color: white;
    }

    .hidden {
      display: none;
    }

    .confetti-piece {
      position: fixed;
      top: -12px;
      width: 8px;
      height: 14px;
      border-radius: 2px;
      pointer-events: none;
      animation: fall 2.4s ease-in forwards;
    }

    @keyframes fall {
      to {
        transform: translateY(105vh) rotate(720deg);
        opacity: 0.2;
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 22px 16px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Sparemål</h1>
        <p class="goal" id="goal-label">{{GOAL_LABEL}}</p>
      </div>
      <button class="icon-btn" id="settings-btn" type="button">Innstillinger</button>
    </header>
    <div class="summary" id="summary">{{SUMMARY}}</div>
    <div class="progress"><div class="progress-bar" id="progress-bar" style="width: {{PERCENT}}%"></div></div>
    <div class="{{MESSAGE_CLASS}}" id="celebration-message">{{MESSAGE}}</div>
    <section class="grid" id="grid">
{{GRID}}    </section>
  </main>

  <div class="overlay hidden" id="settings-overlay">
    <form class="modal" id="settings-form" method="post" action="/settings">
      <h2>Innstillinger</h2>
      <label>Sparemål
        <input type="number" name="goal" id="settings-goal" value="{{GOAL}}" min="1000" />
      </label>
      <label>Beløp per boks
        <input type="number" name="step" id="settings-step" value="{{STEP}}" min="1" />
      </label>
      <label class="inline">
        <input type="checkbox" name="confetti_enabled" id="settings-confetti" {{CONFETTI_CHECKED}} />
        Konfetti
      </label>
      <label>Konfetti-intervall
        <input type="number" name="confetti_interval" id="settings-confetti-interval" value="{{INTERVAL}}" min="1" />
      </label>
      <div class="modal-actions">
        <button type="button" id="settings-cancel">Avbryt</button>
        <button type="submit" id="settings-save">Lagre</button>
      </div>
    </form>
  </div>

  <script>
    const CONFETTI_COLORS = ['#2563eb', '#22c55e', '#eab308', '#f97316', '#ec4899'];
    const MINOR_PIECES = 80;
    const MAJOR_PIECES = 180;

    const grid = document.getElementById('grid');
    const summaryEl = document.getElementById('summary');
    const progressBar = document.getElementById('progress-bar');
    const goalLabel = document.getElementById('goal-label');
    const messageEl = document.getElementById('celebration-message');

    const settingsBtn = document.getElementById('settings-btn');
    const overlay = document.getElementById('settings-overlay');
    const settingsForm = document.getElementById('settings-form');
    const goalInput = document.getElementById('settings-goal');
    const stepInput = document.getElementById('settings-step');
    const confettiInput = document.getElementById('settings-confetti');
    const intervalInput = document.getElementById('settings-confetti-interval');
    const cancelBtn = document.getElementById('settings-cancel');

    let current = {
      settings: {
        goal: Number(goalInput.value),
        step: Number(stepInput.value),
        confettiEnabled: {{CONFETTI_ENABLED}},
        confettiInterval: Number(intervalInput.value)
      }
    };

    const launchConfetti = (big) => {
      if (!current.settings.confettiEnabled) {
        return;
      }
      const count = big ? MAJOR_PIECES : MINOR_PIECES;
      for (let i = 0; i < count; i += 1) {
        const piece = document.createElement('div');
        piece.className = 'confetti-piece';
        piece.style.left = Math.random() * 100 + 'vw';
        piece.style.backgroundColor = CONFETTI_COLORS[Math.floor(Math.random() * CONFETTI_COLORS.length)];
        piece.style.animationDelay = Math.random() * 0.3 + 's';
        document.body.appendChild(piece);
        piece.addEventListener('animationend', () => piece.remove());
      }
    };

    const showMessage = (text) => {
      messageEl.textContent = text;
      messageEl.classList.remove('hidden');
    };

    const clearMessage = () => {
      messageEl.classList.add('hidden');
      messageEl.textContent = '';
    };

    const applyEffects = (effects) => {
      effects.forEach((effect) => {
        if (effect.kind === 'clear_message') {
          clearMessage();
        } else if (effect.kind === 'minor') {
          launchConfetti(false);
        } else if (effect.kind === 'major') {
          launchConfetti(true);
          showMessage(effect.message);
        }
      });
    };

    const renderGrid = (state) => {
      grid.innerHTML = '';
      state.boxes.forEach((item, position) => {
        const wrapper = document.createElement('div');
        wrapper.className = 'saving-item';
        wrapper.classList.toggle('checked', item.checked);
        const input = document.createElement('input');
        input.type = 'checkbox';
        input.id = 'saving-' + item.value;
        input.dataset.position = String(position);
        input.checked = item.checked;
        const label = document.createElement('label');
        label.htmlFor = input.id;
        label.textContent = item.label;
        wrapper.appendChild(input);
        wrapper.appendChild(label);
        grid.appendChild(wrapper);
      });
    };

    const renderState = (state, rebuild) => {
      current = state;
      if (rebuild) {
        renderGrid(state);
      } else {
        grid.querySelectorAll('input[type="checkbox"]').forEach((input, position) => {
          const checked = state.boxes[position].checked;
          input.checked = checked;
          input.closest('.saving-item').classList.toggle('checked', checked);
        });
      }
      summaryEl.textContent = state.summary;
      goalLabel.textContent = state.goal_label;
      progressBar.style.width = state.percent + '%';
    };

    // Requests run one at a time so responses apply in the order they were sent.
    let pending = Promise.resolve();
    const enqueue = (task) => {
      pending = pending.then(task).catch((err) => console.error(err));
      return pending;
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    grid.addEventListener('change', (event) => {
      const input = event.target;
      if (!input.dataset || input.dataset.position === undefined) {
        return;
      }
      const body = { position: Number(input.dataset.position), checked: input.checked };
      enqueue(() =>
        post('/api/toggle', body).then((res) => {
          renderState(res.state, false);
          applyEffects(res.effects);
        })
      );
    });

    const openSettings = () => {
      goalInput.value = current.settings.goal;
      stepInput.value = current.settings.step;
      confettiInput.checked = current.settings.confettiEnabled;
      intervalInput.value = current.settings.confettiInterval;
      overlay.classList.remove('hidden');
    };

    const closeSettings = () => overlay.classList.add('hidden');

    settingsBtn.addEventListener('click', openSettings);
    cancelBtn.addEventListener('click', closeSettings);
    overlay.addEventListener('click', (event) => {
      if (event.target === overlay) {
        closeSettings();
      }
    });

    settingsForm.addEventListener('submit', (event) => {
      event.preventDefault();
      const body = {
        goal: goalInput.value,
        step: stepInput.value,
        confetti_interval: intervalInput.value,
        confetti_enabled: confettiInput.checked
      };
      enqueue(() =>
        post('/api/settings', body).then((res) => {
          renderState(res.state, true);
          applyEffects(res.effects);
          closeSettings();
        })
      );
    });

    fetch('/api/state')
      .then((res) => res.json())
      .then((state) => renderState(state, false))
      .catch((err) => console.error(err));
  </script>
</body>
</html>
"#;
