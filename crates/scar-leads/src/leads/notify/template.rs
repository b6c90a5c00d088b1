use chrono::{DateTime, Utc};

use crate::leads::domain::Lead;

const QUICK_REPLY_SUBJECT: &str = "Re: Early Access Request";

const NEXT_STEPS: [&str; 4] = [
    "Review the lead information and message",
    "Respond to the lead promptly to maintain engagement",
    "Add the lead to your CRM or contact management system",
    "Follow up with additional information about early access",
];

/// Subject plus dual HTML / plain-text bodies for a lead notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn render(lead: &Lead, company_name: &str, submitted_at: DateTime<Utc>) -> RenderedEmail {
    RenderedEmail {
        subject: subject(lead),
        html: render_html(lead, company_name, submitted_at),
        text: render_text(lead, company_name, submitted_at),
    }
}

pub fn subject(lead: &Lead) -> String {
    format!("New Lead Form Submission - {}", lead.name())
}

pub fn reply_link(lead: &Lead) -> String {
    format!("mailto:{}", lead.email())
}

/// Pre-addressed reply with a canned greeting.
pub fn quick_reply_link(lead: &Lead, company_name: &str) -> String {
    let body = format!(
        "Hi {},\n\nThank you for your interest in our safety management system. We'll be in touch soon with more details about early access.\n\nBest regards,\n{} Team",
        lead.name(),
        company_name
    );
    format!(
        "mailto:{}?subject={}&body={}",
        lead.email(),
        urlencoding::encode(QUICK_REPLY_SUBJECT),
        urlencoding::encode(&body)
    )
}

fn timestamp(submitted_at: DateTime<Utc>) -> String {
    submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn footer_line(submitted_at: DateTime<Utc>) -> String {
    format!(
        "Lead form submitted on {} at {}",
        submitted_at.format("%B %d, %Y"),
        submitted_at.format("%H:%M UTC")
    )
}

fn render_html(lead: &Lead, company_name: &str, submitted_at: DateTime<Utc>) -> String {
    let company = escape_html(company_name);
    let name = escape_html(lead.name());
    let email = escape_html(lead.email());
    let reply = escape_html(&reply_link(lead));
    let quick_reply = escape_html(&quick_reply_link(lead, company_name));

    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>New Lead Form Submission</title>\n</head>\n",
    );
    html.push_str(
        "<body style=\"margin: 0; padding: 0; background-color: #f9fafb; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;\">\n\
         <div style=\"max-width: 600px; margin: 0 auto; background-color: #ffffff;\">\n",
    );
    html.push_str(&format!(
        "<div style=\"background: linear-gradient(135deg, #dc2626 0%, #b91c1c 100%); padding: 32px 24px; text-align: center;\">\n\
         <h1 style=\"color: #ffffff; margin: 0; font-size: 24px; font-weight: 600;\">New Lead Form Submission</h1>\n\
         <p style=\"color: #fecaca; margin: 8px 0 0 0; font-size: 16px;\">{company}</p>\n</div>\n"
    ));

    html.push_str(
        "<div style=\"padding: 32px 24px;\">\n\
         <h2 style=\"color: #1f2937; margin: 0 0 16px 0; font-size: 20px; font-weight: 600;\">Lead Information</h2>\n\
         <p style=\"color: #4b5563; margin: 0 0 24px 0; font-size: 16px; line-height: 1.6;\">A new lead has submitted the early access request form on your landing page.</p>\n",
    );

    html.push_str(
        "<div style=\"background-color: #eff6ff; border-left: 4px solid #3b82f6; padding: 16px; margin: 24px 0; border-radius: 0 8px 8px 0;\">\n\
         <h3 style=\"color: #1e40af; margin: 0 0 12px 0; font-size: 18px; font-weight: 600;\">Contact Details</h3>\n\
         <table style=\"width: 100%; border-collapse: collapse;\">\n",
    );
    html.push_str(&detail_row("Name", &name));
    html.push_str(&detail_row(
        "Email",
        &format!("<a href=\"{reply}\" style=\"color: #3b82f6; text-decoration: none;\">{email}</a>"),
    ));
    if let Some(organization) = lead.organization() {
        html.push_str(&detail_row("Organization", &escape_html(organization)));
    }
    html.push_str(&detail_row("Submitted", &timestamp(submitted_at)));
    html.push_str("</table>\n</div>\n");

    if let Some(message) = lead.message() {
        html.push_str(&format!(
            "<div style=\"background-color: #fef3c7; border-left: 4px solid #f59e0b; padding: 16px; margin: 24px 0; border-radius: 0 8px 8px 0;\">\n\
             <h3 style=\"color: #92400e; margin: 0 0 12px 0; font-size: 18px; font-weight: 600;\">Message</h3>\n\
             <p style=\"color: #92400e; margin: 0; font-size: 14px; line-height: 1.6; white-space: pre-wrap;\">{}</p>\n</div>\n",
            escape_html(message)
        ));
    }

    html.push_str(&format!(
        "<div style=\"text-align: center; margin: 32px 0;\">\n\
         <a href=\"{reply}\" style=\"background-color: #3b82f6; color: #ffffff; padding: 12px 24px; text-decoration: none; border-radius: 8px; font-weight: 600; display: inline-block; margin-right: 12px;\">Reply to Lead</a>\n\
         <a href=\"{quick_reply}\" style=\"background-color: #059669; color: #ffffff; padding: 12px 24px; text-decoration: none; border-radius: 8px; font-weight: 600; display: inline-block;\">Quick Reply</a>\n</div>\n"
    ));

    html.push_str(
        "<div style=\"background-color: #f3f4f6; border-left: 4px solid #6b7280; padding: 16px; margin: 24px 0; border-radius: 0 8px 8px 0;\">\n\
         <h4 style=\"color: #374151; margin: 0 0 8px 0; font-size: 16px; font-weight: 600;\">Next Steps</h4>\n\
         <ul style=\"color: #374151; margin: 0; padding-left: 20px; font-size: 14px; line-height: 1.6;\">\n",
    );
    for step in NEXT_STEPS {
        html.push_str(&format!("<li>{step}</li>\n"));
    }
    html.push_str("</ul>\n</div>\n");

    html.push_str(&format!(
        "<div style=\"border-top: 1px solid #e5e7eb; padding-top: 24px; margin-top: 32px; text-align: center;\">\n\
         <p style=\"color: #6b7280; margin: 0; font-size: 14px;\">This is an automated notification from the {company} landing page.</p>\n\
         <p style=\"color: #6b7280; margin: 8px 0 0 0; font-size: 14px;\">{}</p>\n</div>\n",
        footer_line(submitted_at)
    ));
    html.push_str("</div>\n</div>\n</body>\n</html>\n");

    html
}

fn detail_row(label: &str, value_html: &str) -> String {
    format!(
        "<tr><td style=\"padding: 8px 0; font-weight: 600; color: #374151; width: 30%;\">{label}:</td>\
         <td style=\"padding: 8px 0; color: #1f2937;\">{value_html}</td></tr>\n"
    )
}

fn render_text(lead: &Lead, company_name: &str, submitted_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        "NEW LEAD FORM SUBMISSION".to_string(),
        company_name.to_string(),
        String::new(),
        "LEAD INFORMATION".to_string(),
        String::new(),
        "A new lead has submitted the early access request form on your landing page."
            .to_string(),
        String::new(),
        "CONTACT DETAILS:".to_string(),
        format!("Name: {}", lead.name()),
        format!("Email: {}", lead.email()),
    ];
    if let Some(organization) = lead.organization() {
        lines.push(format!("Organization: {organization}"));
    }
    lines.push(format!("Submitted: {}", timestamp(submitted_at)));

    if let Some(message) = lead.message() {
        lines.push(String::new());
        lines.push("MESSAGE:".to_string());
        lines.push(message.to_string());
    }

    lines.push(String::new());
    lines.push("QUICK ACTIONS:".to_string());
    lines.push(format!("- Reply to Lead: {}", reply_link(lead)));
    lines.push(format!("- Quick Reply: {}", quick_reply_link(lead, company_name)));

    lines.push(String::new());
    lines.push("NEXT STEPS:".to_string());
    lines.extend(NEXT_STEPS.iter().map(|step| format!("- {step}")));

    lines.push(String::new());
    lines.push(format!("This is an automated notification from the {company_name} landing page."));
    lines.push(footer_line(submitted_at));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
