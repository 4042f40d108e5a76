//! The single editor page.
//!
//! The page is a thin view over the WebSocket session: it sends every edit to
//! the server and renders whatever state comes back (banners, text, mention
//! candidates, save status). No editor logic lives in the browser.

use super::components::{base_html, html_escape};

/// Render the editor page. `last_update` is shown under the note title.
pub fn render_editor(last_update: &str) -> String {
    let content = format!(
        r##"<h1>Note-taking App</h1>
    <div id="loading" class="banner">Loading...</div>
    <div id="error" class="banner error hidden"></div>
    <div id="main" class="card hidden">
        <h2>Note Title</h2>
        <p class="last-update">Last update: {last_update}</p>
        <textarea id="note" placeholder="Start typing here... Use @ to mention users"></textarea>
        <div id="mentions" class="mention-list hidden"></div>
        <div id="save-status" class="save-status"></div>
    </div>
    <script>
(function() {{
    'use strict';

    const loadingEl = document.getElementById('loading');
    const errorEl = document.getElementById('error');
    const mainEl = document.getElementById('main');
    const noteEl = document.getElementById('note');
    const mentionsEl = document.getElementById('mentions');
    const statusEl = document.getElementById('save-status');

    const proto = location.protocol === 'https:' ? 'wss:' : 'ws:';
    const ws = new WebSocket(proto + '//' + location.host + '/ws');

    function send(msg) {{
        if (ws.readyState === WebSocket.OPEN) {{
            ws.send(JSON.stringify(msg));
        }}
    }}

    function showError(message) {{
        loadingEl.classList.add('hidden');
        mainEl.classList.add('hidden');
        errorEl.textContent = 'Error: ' + message;
        errorEl.classList.remove('hidden');
    }}

    function renderCandidates(users) {{
        mentionsEl.innerHTML = '';
        if (!users.length) {{
            mentionsEl.classList.add('hidden');
            return;
        }}
        users.forEach(user => {{
            const item = document.createElement('div');
            item.className = 'mention-item';
            item.textContent = user.first_name;
            item.addEventListener('click', () => {{
                if (user.first_name) send({{ type: 'select', id: user.id }});
            }});
            mentionsEl.appendChild(item);
        }});
        mentionsEl.classList.remove('hidden');
    }}

    function renderStatus(status) {{
        statusEl.className = 'save-status';
        if (status.phase === 'creating' || status.phase === 'updating') {{
            statusEl.classList.add('saving');
            statusEl.textContent = 'Saving...';
        }} else if (status.last_error) {{
            statusEl.classList.add('failed');
            statusEl.textContent = 'Not saved: ' + status.last_error;
        }} else if (status.last_saved_at) {{
            statusEl.classList.add('saved');
            statusEl.textContent = 'Saved';
        }}
    }}

    noteEl.addEventListener('input', () => {{
        send({{ type: 'edit', text: noteEl.value }});
    }});

    ws.onmessage = (event) => {{
        const msg = JSON.parse(event.data);
        switch (msg.type) {{
            case 'loading':
                loadingEl.classList.remove('hidden');
                break;
            case 'ready':
                noteEl.value = msg.text;
                loadingEl.classList.add('hidden');
                mainEl.classList.remove('hidden');
                noteEl.focus();
                break;
            case 'error':
                showError(msg.message);
                break;
            case 'candidates':
                renderCandidates(msg.users);
                break;
            case 'text':
                noteEl.value = msg.text;
                noteEl.focus();
                noteEl.setSelectionRange(msg.text.length, msg.text.length);
                break;
            case 'status':
                renderStatus(msg);
                break;
        }}
    }};

    ws.onclose = () => {{
        if (errorEl.classList.contains('hidden')) {{
            showError('Connection lost. Reload the page to continue.');
        }}
    }};
}})();
    </script>"##,
        last_update = html_escape(last_update),
    );

    base_html("Notes", &content)
}
