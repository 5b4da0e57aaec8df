use crate::models::Task;
use crate::stats::board_stats;
use crate::tasks::TaskBoard;

pub fn render_index(board: &TaskBoard) -> String {
    let stats = board_stats(board.tasks());
    // Rows carry user text, so they are spliced in last and never rescanned.
    INDEX_HTML
        .replace("{{TOTAL}}", &stats.total.to_string())
        .replace("{{COMPLETED}}", &stats.completed.to_string())
        .replace("{{REMAINING}}", &stats.remaining.to_string())
        .replace("{{ROWS}}", &render_rows(board.tasks()))
}

fn render_rows(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return r#"<div class="empty-state">No tasks yet. Add one above!</div>"#.to_string();
    }

    let mut rows = String::new();
    for task in tasks {
        let (checked, text_class, dim) = if task.completed {
            (" checked", " completed", r#" style="opacity:0.7""#)
        } else {
            ("", "", "")
        };
        rows.push_str(&format!(
            r#"<li class="task-row" data-id="{id}"{dim}><input type="checkbox" class="task-checkbox"{checked} /><span class="task-text{text_class}">{text}</span><button class="delete-btn" type="button">Delete</button></li>"#,
            id = task.id,
            text = escape_html(&task.text),
        ));
    }
    rows
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>My To-Do List</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef2f7;
      --bg-2: #cdd9ef;
      --ink: #22272e;
      --accent: #5667e2;
      --accent-2: #2d7a4b;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(34, 39, 46, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3ecf5 60%, #f2f4f8 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5d6570;
      font-size: 0.95rem;
    }

    #task-form {
      display: flex;
      gap: 10px;
    }

    #task-input {
      flex: 1;
      border: 1px solid rgba(34, 39, 46, 0.18);
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      background: white;
    }

    #task-input:focus {
      outline: 2px solid var(--accent);
      outline-offset: 1px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    #add-btn {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(86, 103, 226, 0.3);
      white-space: nowrap;
    }

    #add-btn.flash {
      background: var(--accent-2);
      box-shadow: 0 10px 24px rgba(45, 122, 75, 0.3);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    .stat {
      background: white;
      border-radius: 16px;
      padding: 14px;
      border: 1px solid rgba(34, 39, 46, 0.08);
      display: grid;
      gap: 6px;
      text-align: center;
    }

    .stat .label {
      font-size: 0.78rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #858c95;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    #todo-list {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .task-row {
      display: flex;
      align-items: center;
      gap: 12px;
      background: white;
      border: 1px solid rgba(34, 39, 46, 0.08);
      border-radius: 16px;
      padding: 12px 16px;
      transition: transform 300ms ease, opacity 300ms ease;
    }

    .task-checkbox {
      width: 18px;
      height: 18px;
      accent-color: var(--accent-2);
      flex-shrink: 0;
    }

    .task-text {
      flex: 1;
      overflow-wrap: anywhere;
    }

    .task-text.completed {
      text-decoration: line-through;
      color: #858c95;
    }

    .delete-btn {
      background: transparent;
      color: var(--danger);
      border: 1px solid rgba(198, 59, 43, 0.35);
      padding: 6px 14px;
      font-size: 0.85rem;
    }

    .delete-btn:hover {
      background: rgba(198, 59, 43, 0.08);
    }

    .empty-state {
      text-align: center;
      color: #858c95;
      padding: 28px 0;
      border: 1px dashed rgba(34, 39, 46, 0.18);
      border-radius: 16px;
    }

    .status {
      font-size: 0.9rem;
      color: var(--danger);
      min-height: 1.2em;
    }

    .hint {
      margin: 0;
      color: #6f757d;
      font-size: 0.85rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 480px) {
      .app {
        padding: 24px 18px;
      }
      #task-form {
        flex-direction: column;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>My To-Do List</h1>
      <p class="subtitle">Add tasks, tick them off, clear them out.</p>
    </header>

    <form id="task-form" method="post" action="/tasks">
      <input id="task-input" name="text" type="text" placeholder="What needs doing?" autocomplete="off" />
      <button id="add-btn" data-label="Add Task" type="submit">Add Task</button>
    </form>

    <section class="panel">
      <div class="stat">
        <span class="label">Total</span>
        <span id="total-tasks" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Completed</span>
        <span id="completed-tasks" class="value">{{COMPLETED}}</span>
      </div>
      <div class="stat">
        <span class="label">Remaining</span>
        <span id="remaining-tasks" class="value">{{REMAINING}}</span>
      </div>
    </section>

    <ul id="todo-list">{{ROWS}}</ul>

    <div class="status" id="status"></div>
    <p class="hint">Ctrl/Cmd+Enter adds, Escape clears the input. Tasks live in memory only; restarting the server clears the list.</p>
  </main>

  <script>
    const taskForm = document.getElementById('task-form');
    const taskInput = document.getElementById('task-input');
    const addButton = document.getElementById('add-btn');
    const todoList = document.getElementById('todo-list');
    const statusEl = document.getElementById('status');
    const totalEl = document.getElementById('total-tasks');
    const completedEl = document.getElementById('completed-tasks');
    const remainingEl = document.getElementById('remaining-tasks');

    const MAX_LENGTH = 100;
    const EXIT_MS = 300;
    const SHRINK_MS = 200;
    const FLASH_MS = 1000;
    const STEP_MS = 50;

    const setStatus = (message) => {
      statusEl.textContent = message || '';
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const postJson = (url, body) =>
      request(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });

    // One live stepper per counter element; re-triggering cancels the
    // pending one before arming a new interval.
    const steppers = new Map();

    const animateNumber = (element, target) => {
      const pending = steppers.get(element);
      if (pending) {
        clearInterval(pending);
        steppers.delete(element);
      }

      const current = parseInt(element.textContent, 10) || 0;
      if (current === target) {
        return;
      }

      const increment = target > current ? 1 : -1;
      const timer = setInterval(() => {
        const next = (parseInt(element.textContent, 10) || 0) + increment;
        element.textContent = next;
        if (next === target) {
          clearInterval(timer);
          steppers.delete(element);
        }
      }, STEP_MS);
      steppers.set(element, timer);
    };

    const animateStats = (stats) => {
      animateNumber(totalEl, stats.total);
      animateNumber(completedEl, stats.completed);
      animateNumber(remainingEl, stats.remaining);
    };

    const setStats = (stats) => {
      totalEl.textContent = stats.total;
      completedEl.textContent = stats.completed;
      remainingEl.textContent = stats.remaining;
    };

    const showEmptyState = () => {
      const empty = document.createElement('div');
      empty.className = 'empty-state';
      empty.textContent = 'No tasks yet. Add one above!';
      todoList.appendChild(empty);
    };

    const removeEmptyState = () => {
      const empty = todoList.querySelector('.empty-state');
      if (empty) {
        empty.remove();
      }
    };

    const buildRow = (task) => {
      const row = document.createElement('li');
      row.className = 'task-row';
      row.dataset.id = task.id;

      const checkbox = document.createElement('input');
      checkbox.type = 'checkbox';
      checkbox.className = 'task-checkbox';
      checkbox.checked = task.completed;

      const text = document.createElement('span');
      text.className = 'task-text';
      text.textContent = task.text;

      const del = document.createElement('button');
      del.type = 'button';
      del.className = 'delete-btn';
      del.textContent = 'Delete';

      if (task.completed) {
        text.classList.add('completed');
        row.style.opacity = '0.7';
      }

      row.appendChild(checkbox);
      row.appendChild(text);
      row.appendChild(del);
      return row;
    };

    const flashButton = () => {
      addButton.textContent = '✓ Added!';
      addButton.classList.add('flash');
      if (addButton._flashTimer) {
        clearTimeout(addButton._flashTimer);
      }
      addButton._flashTimer = setTimeout(() => {
        addButton.textContent = addButton.dataset.label;
        addButton.classList.remove('flash');
      }, FLASH_MS);
    };

    taskForm.addEventListener('submit', (event) => {
      event.preventDefault();
      const text = taskInput.value.trim();
      if (text === '') {
        return;
      }
      postJson('/api/tasks', { text })
        .then((data) => {
          removeEmptyState();
          todoList.appendChild(buildRow(data.task));
          taskInput.value = '';
          taskInput.focus();
          animateStats(data.stats);
          flashButton();
          setStatus('');
        })
        .catch((err) => setStatus(err.message));
    });

    todoList.addEventListener('change', (event) => {
      const checkbox = event.target;
      if (!checkbox.classList.contains('task-checkbox')) {
        return;
      }
      const row = checkbox.closest('li');
      const completed = checkbox.checked;
      postJson(`/api/tasks/${row.dataset.id}/toggle`, { completed })
        .then((data) => {
          const text = row.querySelector('.task-text');
          if (data.task.completed) {
            text.classList.add('completed');
            row.style.opacity = '0.7';
            row.style.transform = 'scale(0.98)';
            if (row._shrinkTimer) {
              clearTimeout(row._shrinkTimer);
            }
            row._shrinkTimer = setTimeout(() => {
              row.style.transform = 'scale(1)';
            }, SHRINK_MS);
          } else {
            text.classList.remove('completed');
            row.style.opacity = '1';
            row.style.transform = 'scale(1)';
          }
          animateStats(data.stats);
        })
        .catch((err) => {
          checkbox.checked = !completed;
          setStatus(err.message);
        });
    });

    todoList.addEventListener('click', (event) => {
      const button = event.target;
      if (!button.classList.contains('delete-btn')) {
        return;
      }
      const row = button.closest('li');
      if (row._removePending) {
        return;
      }
      row._removePending = true;
      row.style.transform = 'translateX(100%)';
      row.style.opacity = '0';
      setTimeout(() => {
        request(`/api/tasks/${row.dataset.id}`, { method: 'DELETE' })
          .then((data) => {
            if (row._shrinkTimer) {
              clearTimeout(row._shrinkTimer);
            }
            row.remove();
            if (data.stats.total === 0) {
              showEmptyState();
            }
            animateStats(data.stats);
          })
          .catch((err) => setStatus(err.message));
      }, EXIT_MS);
    });

    document.addEventListener('keydown', (event) => {
      if ((event.ctrlKey || event.metaKey) && event.key === 'Enter') {
        taskForm.requestSubmit();
      }
      if (event.key === 'Escape') {
        taskInput.value = '';
        taskInput.blur();
      }
    });

    taskInput.addEventListener('input', () => {
      if (taskInput.value.length > MAX_LENGTH) {
        taskInput.value = taskInput.value.substring(0, MAX_LENGTH);
      }
    });

    const loadTasks = async () => {
      const data = await request('/api/tasks');
      todoList.innerHTML = '';
      if (data.tasks.length === 0) {
        showEmptyState();
      } else {
        data.tasks.forEach((task) => todoList.appendChild(buildRow(task)));
      }
      setStats(data.stats);
    };

    loadTasks().catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
