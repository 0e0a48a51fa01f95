//! Portfolio content.

use super::{
    DevOpsProjectRecord, Decision, ImageRef, Layer, Links, Metric, Profile, ProjectRecord,
    Status, TagSet,
};

pub static PROFILE: Profile = Profile {
    name: "Alex Morgan",
    role: "Full-Stack & Platform Engineer",
    location: "Lisbon, Portugal",
    headline: "I build products end to end, from the interface down to the pipeline that ships it.",
    bio: &[
        "Engineer with a product streak. I have spent the last years building web platforms, \
         AI-assisted tools and the infrastructure underneath them.",
        "I care about fast feedback loops: typed APIs, reproducible builds, observable \
         systems and interfaces that stay out of the user's way.",
        "Currently open to collaborations on developer tooling and applied AI products.",
    ],
    highlights: &[
        ("6+", "years shipping production software"),
        ("30+", "projects delivered"),
        ("12", "CI/CD pipelines maintained"),
    ],
    skills: &[
        "TypeScript", "Rust", "Python", "React", "Next.js", "Node.js", "PostgreSQL",
        "Docker", "Kubernetes", "Terraform", "AWS", "GitHub Actions",
    ],
};

pub static PROJECTS: &[ProjectRecord] = &[
    ProjectRecord {
        id: "lumen-analytics",
        title: "Lumen Analytics",
        tagline: "Product analytics without the tracking tax",
        category: "SaaS Platform",
        status: Status::LiveProduction,
        summary: "Privacy-first analytics with real-time dashboards and funnel exploration.",
        description: "Lumen ingests events through an edge collector, aggregates them in \
                      columnar storage and serves sub-second dashboards. No cookies, no \
                      fingerprinting, and every query runs against aggregated data only.",
        images: &[
            ImageRef { src: "/projects/lumen/cover.png", caption: "Realtime overview dashboard" },
            ImageRef { src: "/projects/lumen/funnels.png", caption: "Funnel explorer with step drop-off" },
            ImageRef { src: "/projects/lumen/retention.png", caption: "Cohort retention heatmap" },
        ],
        tags: TagSet::Grouped(&[
            (Layer::Frontend, &["Next.js", "React", "Tailwind CSS"]),
            (Layer::Backend, &["Node.js", "Next.js", "tRPC"]),
            (Layer::Database, &["ClickHouse", "PostgreSQL"]),
            (Layer::Devops, &["Docker", "Fly.io"]),
        ]),
        metrics: &[
            Metric { label: "Events / day", value: "40M", description: "Sustained ingestion across tenants" },
            Metric { label: "P95 query", value: "180ms", description: "Dashboard query latency" },
            Metric { label: "Uptime", value: "99.95%", description: "Trailing twelve months" },
        ],
        architecture: Some(
            "Edge collectors batch events into a queue; a consumer writes them to ClickHouse \
             in 5-second micro-batches. Materialized views pre-aggregate per tenant, and the \
             API only ever reads those views.",
        ),
        decisions: &[
            Decision {
                title: "ClickHouse over Postgres for events",
                rationale: "Columnar scans over billions of rows stay within the latency \
                            budget without hand-maintained rollup tables.",
            },
            Decision {
                title: "Aggregate-only query layer",
                rationale: "Raw events never leave the ingestion tier, which keeps the \
                            privacy guarantee structural instead of procedural.",
            },
        ],
        links: Links { live: Some("https://lumen.example.com"), source: None },
    },
    ProjectRecord {
        id: "scribe-ai",
        title: "Scribe AI",
        tagline: "Meeting notes that write themselves",
        category: "AI Product",
        status: Status::BetaAccess,
        summary: "Transcribes calls, extracts decisions and action items, and files them where your team works.",
        description: "Scribe joins calls as a bot, streams audio to a speech model and \
                      produces structured summaries. Action items are pushed to issue \
                      trackers with owners resolved from the attendee list.",
        images: &[
            ImageRef { src: "/projects/scribe/cover.png", caption: "Summary view with highlighted decisions" },
            ImageRef { src: "/projects/scribe/actions.png", caption: "Action items synced to the tracker" },
        ],
        tags: TagSet::Grouped(&[
            (Layer::Ai, &["Whisper", "OpenAI", "LangChain"]),
            (Layer::Frontend, &["React", "Vite"]),
            (Layer::Backend, &["Python", "FastAPI"]),
        ]),
        metrics: &[
            Metric { label: "Beta teams", value: "120", description: "Active teams in the private beta" },
            Metric { label: "Word error rate", value: "6.1%", description: "On the internal evaluation set" },
        ],
        architecture: Some(
            "Audio is chunked at silence boundaries and transcribed in parallel; a second \
             pass aligns speakers and a structured-output prompt extracts decisions.",
        ),
        decisions: &[Decision {
            title: "Two-pass summarisation",
            rationale: "Summarising per topic segment first keeps long meetings inside the \
                        context window and improves recall of late decisions.",
        }],
        links: Links { live: Some("https://scribe.example.com"), source: None },
    },
    ProjectRecord {
        id: "tern",
        title: "Tern",
        tagline: "A tiny, fast static site generator",
        category: "Developer Tool",
        status: Status::OpenSource,
        summary: "Markdown in, static HTML out, with incremental rebuilds under 50ms.",
        description: "Tern watches a content directory, tracks template dependencies and \
                      only re-renders the pages affected by a change.",
        images: &[
            ImageRef { src: "/projects/tern/cover.png", caption: "Live-reload dev server" },
            ImageRef { src: "/projects/tern/graph.png", caption: "Dependency graph of a docs site" },
            ImageRef { src: "/projects/tern/themes.png", caption: "Starter themes" },
            ImageRef { src: "/projects/tern/cli.png", caption: "CLI build output" },
        ],
        tags: TagSet::Flat(&["Rust", "Tera", "pulldown-cmark", "notify"]),
        metrics: &[Metric { label: "GitHub stars", value: "2.3k", description: "Community adoption" }],
        architecture: None,
        decisions: &[],
        links: Links { live: None, source: Some("https://github.com/example/tern") },
    },
    ProjectRecord {
        id: "harbor-crm",
        title: "Harbor CRM",
        tagline: "A CRM for small marinas",
        category: "Client Work",
        status: Status::LiveProduction,
        summary: "Berth bookings, invoicing and maintenance schedules for independent marinas.",
        description: "Built with a three-person client team. Harbor replaced spreadsheets \
                      and a paper logbook with a booking calendar and automated invoices.",
        images: &[
            ImageRef { src: "/projects/harbor/cover.png", caption: "Berth occupancy calendar" },
            ImageRef { src: "/projects/harbor/invoice.png", caption: "Generated invoice" },
        ],
        tags: TagSet::Grouped(&[
            (Layer::Frontend, &["Vue", "Nuxt"]),
            (Layer::Backend, &["Laravel"]),
            (Layer::Database, &["MySQL"]),
        ]),
        metrics: &[Metric { label: "Admin time saved", value: "11h/wk", description: "Reported by the client after three months" }],
        architecture: None,
        decisions: &[],
        links: Links { live: Some("https://harbor.example.com"), source: None },
    },
    ProjectRecord {
        id: "pulse-monitor",
        title: "Pulse",
        tagline: "Uptime checks with human-readable incidents",
        category: "SaaS Platform",
        status: Status::BetaAccess,
        summary: "Multi-region HTTP checks that group failures into incidents and draft status-page updates.",
        description: "Probes run from five regions; a correlation step groups failures by \
                      cause before anyone is paged, and an LLM drafts the status-page text.",
        images: &[
            ImageRef { src: "/projects/pulse/cover.png", caption: "Incident timeline" },
            ImageRef { src: "/projects/pulse/regions.png", caption: "Regional latency map" },
        ],
        tags: TagSet::Grouped(&[
            (Layer::Backend, &["Go", "NATS"]),
            (Layer::Ai, &["OpenAI"]),
            (Layer::Frontend, &["SvelteKit"]),
            (Layer::Devops, &["Kubernetes", "Prometheus"]),
        ]),
        metrics: &[],
        architecture: Some("Regional probe workers publish results to NATS; a correlator consumes all regions and emits incidents."),
        decisions: &[],
        links: Links { live: None, source: None },
    },
    ProjectRecord {
        id: "fieldnote",
        title: "Fieldnote",
        tagline: "Offline-first notes for researchers",
        category: "Mobile App",
        status: Status::InDevelopment,
        summary: "Capture observations without signal and sync when you are back in range.",
        description: "CRDT-based notes with photo attachments and GPS tags. Sync is \
                      conflict-free, so two researchers can edit the same site log offline.",
        images: &[ImageRef { src: "/projects/fieldnote/cover.png", caption: "Site log with geotagged photos" }],
        tags: TagSet::Flat(&["React Native", "Automerge", "SQLite", "Expo"]),
        metrics: &[],
        architecture: None,
        decisions: &[Decision {
            title: "CRDTs instead of server-side merge",
            rationale: "Researchers are offline for days; a merge server would turn every \
                        sync into a conflict-resolution session.",
        }],
        links: Links { live: None, source: None },
    },
    ProjectRecord {
        id: "inkwell",
        title: "Inkwell",
        tagline: "A writing app that stays quiet",
        category: "Desktop App",
        status: Status::OpenSource,
        summary: "Distraction-free Markdown editor with typewriter scrolling.",
        description: "Inkwell is a small Tauri app with a custom editor surface, focus mode \
                      and exports to PDF and EPUB.",
        images: &[
            ImageRef { src: "/projects/inkwell/cover.png", caption: "Focus mode" },
            ImageRef { src: "/projects/inkwell/export.png", caption: "EPUB export dialog" },
        ],
        tags: TagSet::Flat(&["Tauri", "Rust", "TypeScript", "CodeMirror", "Pandoc", "Solid"]),
        metrics: &[],
        architecture: None,
        decisions: &[],
        links: Links { live: None, source: Some("https://github.com/example/inkwell") },
    },
    ProjectRecord {
        id: "atlas-search",
        title: "Atlas Search",
        tagline: "Semantic search over internal docs",
        category: "AI Product",
        status: Status::LiveProduction,
        summary: "Hybrid keyword and vector search across wikis, tickets and code.",
        description: "Atlas indexes Confluence, Jira and Git repositories, embeds chunks \
                      and answers questions with citations back to the source page.",
        images: &[
            ImageRef { src: "/projects/atlas/cover.png", caption: "Answer with inline citations" },
            ImageRef { src: "/projects/atlas/sources.png", caption: "Connected sources" },
            ImageRef { src: "/projects/atlas/admin.png", caption: "Index health admin view" },
        ],
        tags: TagSet::Grouped(&[
            (Layer::Ai, &["pgvector", "OpenAI", "Cohere Rerank"]),
            (Layer::Backend, &["Python", "FastAPI", "Celery"]),
            (Layer::Frontend, &["Next.js"]),
            (Layer::Database, &["PostgreSQL", "pgvector"]),
        ]),
        metrics: &[
            Metric { label: "Documents", value: "1.2M", description: "Indexed across three tenants" },
            Metric { label: "Answer acceptance", value: "78%", description: "Answers rated helpful" },
        ],
        architecture: Some(
            "Connectors emit change events into Celery; chunks are embedded and stored in \
             pgvector next to a tsvector column so one query can rank both ways.",
        ),
        decisions: &[Decision {
            title: "Hybrid ranking",
            rationale: "Pure vector search missed exact identifiers such as ticket keys; \
                        combining BM25 with embeddings fixed recall for those queries.",
        }],
        links: Links { live: Some("https://atlas.example.com"), source: None },
    },
];

pub static DEVOPS_PROJECTS: &[DevOpsProjectRecord] = &[
    DevOpsProjectRecord {
        id: "devops-gitops-platform",
        slug: "gitops-platform",
        title: "GitOps Platform on EKS",
        summary: "Self-service environments for twelve product teams.",
        description: "Every merge to main is reconciled by Argo CD; preview environments \
                      are created per pull request and torn down on merge.",
        tools: &["Terraform", "AWS EKS", "Argo CD", "Helm", "GitHub Actions"],
        steps: &[
            "Open pull request",
            "Build and scan container image",
            "Provision preview namespace",
            "Run integration suite",
            "Merge and promote via Argo CD",
        ],
    },
    DevOpsProjectRecord {
        id: "devops-observability",
        slug: "observability-stack",
        title: "Observability Stack",
        summary: "Metrics, logs and traces behind a single pane of glass.",
        description: "Replaced three vendor tools with an OpenTelemetry pipeline feeding \
                      Prometheus, Loki and Tempo, with SLO-based alerting.",
        tools: &["OpenTelemetry", "Prometheus", "Grafana", "Loki", "Tempo"],
        steps: &[
            "Instrument services with OpenTelemetry",
            "Route through collector gateway",
            "Store in Prometheus, Loki and Tempo",
            "Evaluate SLO burn rates",
            "Page on-call via Alertmanager",
        ],
    },
    DevOpsProjectRecord {
        id: "devops-release-train",
        slug: "release-train",
        title: "Mobile Release Train",
        summary: "Weekly, automated app-store releases.",
        description: "Fastlane lanes build, sign and upload both apps; a release bot cuts \
                      the branch, collects changelogs and posts the rollout status.",
        tools: &["Fastlane", "GitHub Actions", "Firebase App Distribution"],
        steps: &[
            "Cut release branch",
            "Build and sign",
            "Distribute to testers",
            "Staged store rollout",
        ],
    },
    DevOpsProjectRecord {
        id: "devops-cost-guard",
        slug: "cost-guard",
        title: "Cloud Cost Guard",
        summary: "Budget checks in the pull request, before the bill arrives.",
        description: "Infracost runs on every Terraform plan and blocks merges that exceed \
                      the team's monthly budget delta without an approval.",
        tools: &["Terraform", "Infracost", "OPA", "GitHub Actions"],
        steps: &[
            "Terraform plan",
            "Estimate cost delta",
            "Evaluate budget policy",
            "Require approval when over budget",
        ],
    },
];
