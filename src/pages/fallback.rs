//! Literal demo datasets shown when a live source is unavailable, and the
//! fixed content of the informational pages.

use crate::models::{AlertSummary, DailyStat, DashboardStats, EmailSummary, StatisticsReport, ThreatCount};
use serde::Serialize;

pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_emails: 1247,
        phishing_emails: 24,
        today_emails: 89,
        detection_rate: 98.7,
    }
}

fn email(id: &str, subject: &str, preview: &str, received_at: &str, is_phishing: bool, probability: f64) -> EmailSummary {
    EmailSummary {
        id: id.to_string(),
        subject: subject.to_string(),
        body_preview: preview.to_string(),
        received_at: received_at.to_string(),
        is_phishing,
        probability,
    }
}

pub fn dashboard_emails() -> Vec<EmailSummary> {
    vec![
        email(
            "1",
            "Urgent: Verify Your Bank Account",
            "Please verify your bank account immediately by clicking the link below...",
            "2023-12-01T10:30:00Z",
            true,
            0.95,
        ),
        email(
            "2",
            "Meeting Scheduled for Tomorrow",
            "Hi team, we have a meeting scheduled for tomorrow at 10 AM...",
            "2023-12-01T09:15:00Z",
            false,
            0.12,
        ),
        email(
            "3",
            "Your Account Has Been Compromised",
            "We detected suspicious activity on your account. Reset your password now...",
            "2023-12-01T08:45:00Z",
            true,
            0.87,
        ),
    ]
}

fn alert(id: &str, subject: &str, probability: f64, triggered_at: &str, is_read: bool) -> AlertSummary {
    AlertSummary {
        id: id.to_string(),
        subject: subject.to_string(),
        probability,
        triggered_at: triggered_at.to_string(),
        is_read,
    }
}

pub fn dashboard_alerts() -> Vec<AlertSummary> {
    vec![alert("1", "High probability phishing detected", 0.95, "2023-12-01T10:30:00Z", false)]
}

pub fn alerts_page_alerts() -> Vec<AlertSummary> {
    vec![
        alert("1", "Urgent: Verify Your Bank Account", 0.95, "2023-12-01T10:30:00Z", false),
        alert("2", "Your Subscription Has Expired", 0.87, "2023-12-01T09:15:00Z", false),
        alert("3", "Password Reset Required", 0.78, "2023-11-30T16:45:00Z", true),
    ]
}

pub fn statistics_report() -> StatisticsReport {
    let threat = |threat_type: &str, count| ThreatCount {
        threat_type: threat_type.to_string(),
        count,
    };
    let day = |date: &str, scanned, threats| DailyStat {
        date: date.to_string(),
        scanned,
        threats,
    };

    StatisticsReport {
        total_scanned: 1247,
        phishing_detected: 24,
        false_positives: 2,
        detection_accuracy: 98.7,
        avg_response_time: 0.2,
        top_threats: vec![
            threat("Financial Phishing", 12),
            threat("Account Verification", 8),
            threat("Social Engineering", 4),
        ],
        daily_stats: vec![
            day("2023-11-27", 156, 3),
            day("2023-11-28", 142, 2),
            day("2023-11-29", 178, 5),
            day("2023-11-30", 165, 4),
            day("2023-12-01", 89, 2),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub email: &'static str,
    pub skills: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn team_members() -> Vec<TeamMember> {
    vec![
        TeamMember {
            name: "John Doe",
            role: "Project Lead & Full Stack Developer",
            image: "/images/john-doe.jpg",
            description: "Expert in cybersecurity with 5+ years of experience in full-stack development and system architecture. Specializes in React, Python, and cloud technologies.",
            email: "john.doe@phishguard.ai",
            skills: vec!["React", "Python", "Cybersecurity", "Docker"],
        },
        TeamMember {
            name: "Jane Smith",
            role: "AI/ML Specialist",
            image: "/images/jane-smith.jpg",
            description: "Master's in Machine Learning with focus on NLP and email security applications. Developed the core phishing detection algorithm.",
            email: "jane.smith@phishguard.ai",
            skills: vec!["Machine Learning", "NLP", "Python", "Data Science"],
        },
        TeamMember {
            name: "Mike Johnson",
            role: "Backend Developer",
            image: "/images/mike-johnson.jpg",
            description: "Specializes in real-time systems, API development, and database management. Built the scalable backend infrastructure.",
            email: "mike.johnson@phishguard.ai",
            skills: vec!["Node.js", "MongoDB", "API Design", "System Architecture"],
        },
        TeamMember {
            name: "Dr. Sarah Williams",
            role: "Project Supervisor",
            image: "/images/sarah-williams.jpg",
            description: "Professor of Computer Science with 15+ years of experience in cybersecurity research and education. Provided academic guidance and industry insights.",
            email: "sarah.williams@phishguard.ai",
            skills: vec!["Cybersecurity", "Research", "Mentoring", "Academic Leadership"],
        },
    ]
}

pub fn team_highlights() -> Vec<Highlight> {
    vec![
        Highlight { value: "4+", label: "Team Members" },
        Highlight { value: "6", label: "Months of Development" },
        Highlight { value: "98.7%", label: "Detection Accuracy" },
        Highlight { value: "1000+", label: "Emails Analyzed" },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStep {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInfo {
    pub summary: &'static str,
    pub duration: &'static str,
    pub technology_stack: &'static str,
    pub supervisor: &'static str,
}

pub const MISSION: &str = "PhishGuard AI was developed to address the growing threat of phishing attacks that target organizations and individuals worldwide. Our system leverages cutting-edge artificial intelligence and machine learning techniques to identify and neutralize phishing attempts before they can cause harm.";

pub fn technology_cards() -> Vec<InfoCard> {
    vec![
        InfoCard {
            icon: "fa-robot",
            title: "Machine Learning",
            description: "Advanced ML models trained on thousands of phishing and legitimate emails",
        },
        InfoCard {
            icon: "fa-language",
            title: "Natural Language Processing",
            description: "NLP techniques to understand email content and context",
        },
        InfoCard {
            icon: "fa-bolt",
            title: "Real-time Processing",
            description: "Instant analysis of incoming emails with minimal latency",
        },
        InfoCard {
            icon: "fa-shield-alt",
            title: "Security Protocols",
            description: "Integration with SPF, DKIM, and DMARC for enhanced security",
        },
    ]
}

pub fn workflow_steps() -> Vec<WorkflowStep> {
    vec![
        WorkflowStep {
            number: 1,
            title: "Email Collection",
            description: "Connect to your email account via secure IMAP protocol",
        },
        WorkflowStep {
            number: 2,
            title: "Content Analysis",
            description: "Extract and process email content, headers, and metadata",
        },
        WorkflowStep {
            number: 3,
            title: "AI Classification",
            description: "ML model analyzes features and classifies emails as phishing or legitimate",
        },
        WorkflowStep {
            number: 4,
            title: "Instant Alerts",
            description: "Immediate notifications for suspicious emails with detailed analysis",
        },
    ]
}

pub fn project_info() -> ProjectInfo {
    ProjectInfo {
        summary: "This system was developed as a Final Year Project by computer science students specializing in cybersecurity and artificial intelligence. The project demonstrates the practical application of machine learning in solving real-world security challenges.",
        duration: "6 Months",
        technology_stack: "React, Rust (actix-web), MongoDB",
        supervisor: "Dr. Sarah Williams",
    }
}

pub const DEMO_FEATURES: [&str; 5] = [
    "Real-time email monitoring simulation",
    "AI-powered phishing detection",
    "Professional dashboard",
    "Team information",
    "Project details",
];
