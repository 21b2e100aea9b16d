//! HTML body for contact notification emails.

use crate::contact::Contact;

/// Escape text for safe inclusion in HTML element content and attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the notification body for a contact.
///
/// Every field is escaped, so submitted markup shows up as text in the
/// recipient's mail client.
pub fn render_contact_email(contact: &Contact) -> String {
    let name = escape_html(contact.name());
    let email = escape_html(contact.email());
    let subject = escape_html(contact.subject());
    let message = escape_html(contact.message());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f5f5f5; }}
        .container {{ max-width: 600px; margin: 20px auto; background: white; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }}
        .header {{ background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px 20px; text-align: center; }}
        .header h2 {{ margin: 0; font-size: 24px; font-weight: 600; }}
        .content {{ padding: 30px; }}
        .field {{ margin-bottom: 20px; padding: 15px; background: #f8f9fa; border-radius: 8px; border-left: 4px solid #667eea; }}
        .label {{ font-weight: 600; color: #667eea; font-size: 12px; text-transform: uppercase; letter-spacing: 0.5px; margin-bottom: 5px; }}
        .value {{ color: #333; font-size: 15px; }}
        .value a {{ color: #667eea; text-decoration: none; }}
        .message-box {{ background: #f8f9fa; padding: 20px; border-radius: 8px; border-left: 4px solid #764ba2; white-space: pre-wrap; }}
        .footer {{ padding: 20px; font-size: 12px; color: #888; text-align: center; background: #f8f9fa; border-top: 1px solid #eee; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h2>New Contact Form Submission</h2>
        </div>
        <div class="content">
            <div class="field">
                <div class="label">From</div>
                <div class="value">{name}</div>
            </div>
            <div class="field">
                <div class="label">Email</div>
                <div class="value"><a href="mailto:{email}">{email}</a></div>
            </div>
            <div class="field">
                <div class="label">Subject</div>
                <div class="value">{subject}</div>
            </div>
            <div class="field">
                <div class="label">Message</div>
                <div class="message-box">{message}</div>
            </div>
        </div>
        <div class="footer">
            This email was sent from your portfolio contact form.
        </div>
    </div>
</body>
</html>
"#
    )
}
