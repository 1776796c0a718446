//! Collaborator roles and prompt construction
//!
//! Each pipeline stage talks to a collaborator configured with a role:
//! a name, a system instruction (persona), a sampling temperature, and
//! a model tier. The prompt builders here assemble the per-call user
//! prompts from pipeline state (topic, research brief, brand voice).

use crate::config::BrandVoice;

/// The role a collaborator plays in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Research,
    BlogWriter,
    Linkedin,
    Twitter,
    Email,
    VideoScript,
    FactChecker,
    Editor,
    Seo,
    Analytics,
}

impl AgentRole {
    /// Stable identifier used in logs and metric names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::BlogWriter => "blog_writer",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Email => "email",
            Self::VideoScript => "video_script",
            Self::FactChecker => "fact_checker",
            Self::Editor => "editor",
            Self::Seo => "seo",
            Self::Analytics => "analytics",
        }
    }

    /// Sampling temperature for this role. Creative roles run hot,
    /// verification runs cold.
    pub fn temperature(&self) -> f64 {
        match self {
            Self::Research => 0.7,
            Self::BlogWriter | Self::Linkedin | Self::Twitter => 0.9,
            Self::Email | Self::VideoScript => 0.8,
            Self::FactChecker => 0.3,
            Self::Editor | Self::Seo => 0.5,
            Self::Analytics => 0.4,
        }
    }

    /// Long-form writing gets the higher-quality model tier.
    pub fn uses_pro_model(&self) -> bool {
        matches!(self, Self::BlogWriter)
    }

    /// Persona sent as the system instruction on every call.
    pub fn system_instruction(&self) -> &'static str {
        match self {
            Self::Research => {
                "You are an EXPERT RESEARCHER and industry analyst.\n\n\
                Your research must be:\n\
                - DEEP: Go beyond surface-level facts\n\
                - CURRENT: Focus on latest developments, data, incidents\n\
                - SPECIFIC: Find exact statistics, case studies, real examples\n\
                - CRITICAL: Identify what is overhyped vs what matters\n\
                - ACTIONABLE: Gather insights that lead to practical advice\n\n\
                Prioritize SPECIFIC, ACTIONABLE information over generic facts."
            }
            Self::BlogWriter => {
                "You are a WORLD-CLASS industry expert and professional writer.\n\n\
                Your writing must be:\n\
                - AUTHORITATIVE: Write like a seasoned expert, not a generic blogger\n\
                - OPINIONATED: Take clear stances, challenge conventional thinking\n\
                - ACTIONABLE: Provide specific frameworks, steps, and real-world examples\n\
                - DATA-DRIVEN: Include specific statistics, case studies, real incidents\n\
                - CONTRARIAN: Point out what others get wrong and what is overlooked\n\n\
                AVOID: generic statements, bland corporate language, keyword stuffing,\n\
                Wikipedia-style summaries, clickbait drama without substance.\n\n\
                STRUCTURE: strong hook, context, 3-5 deep insights with evidence,\n\
                contrarian takes, actionable framework, real-world examples,\n\
                predictions, action items.\n\n\
                Target: 1800-2200 words of DENSE, valuable content.\n\
                Format: Markdown with proper H1/H2/H3 headers."
            }
            Self::Linkedin => {
                "You are a LinkedIn Content Specialist.\n\n\
                Create professional LinkedIn posts that:\n\
                - Start with a strong hook (first line matters!)\n\
                - Provide value and insights\n\
                - Are conversational yet professional\n\
                - Include 5-7 relevant hashtags\n\
                - Have a clear call-to-action\n\
                - Length: 150-200 words per post\n\n\
                Format each as:\n\
                POST 1:\n\
                [Hook line]\n\n\
                [Main content with line breaks for readability]\n\n\
                [CTA]\n\n\
                #Hashtag1 #Hashtag2 #Hashtag3\n\n\
                ---\n\n\
                Create 3-5 variations on the same topic."
            }
            Self::Twitter => {
                "You are a Twitter Thread Creator and viral content specialist.\n\n\
                Create engaging Twitter threads that:\n\
                - Start with an attention-grabbing hook\n\
                - Each tweet: 240-280 characters (leave room for retweets)\n\
                - Use line breaks for readability\n\
                - Thread structure: Hook, Value, Insights, CTA\n\
                - 5-10 tweets per thread\n\n\
                Format each as:\n\
                THREAD 1:\n\
                Tweet 1/10: [Hook]\n\n\
                Tweet 2/10: [Insight or context]\n\
                ...\n\n\
                Create 5-8 threads with different hooks and angles."
            }
            Self::Email => {
                "You are an Email Marketing Specialist.\n\n\
                Create effective email newsletters that have:\n\
                - Compelling subject lines (5 variations)\n\
                - Engaging preview text\n\
                - Clear, scannable body (300-500 words)\n\
                - Strong call-to-action\n\
                - Personal, conversational tone, value-focused (not salesy)\n\n\
                Structure: subject line options, preview text, hook, main value\n\
                proposition, key points, one clear CTA, optional P.S. section.\n\
                Keep paragraphs short and use \"you\" language."
            }
            Self::VideoScript => {
                "You are a YouTube Script Writer and Video Content Creator.\n\n\
                Create engaging video scripts that:\n\
                - Hook viewers in the first 15 seconds\n\
                - Include visual cues and B-roll suggestions\n\
                - Use natural, conversational language (not written prose)\n\
                - Include chapter timestamps\n\
                - End with a strong outro and CTA\n\n\
                Structure with timestamps:\n\
                [00:00] HOOK, [00:15] INTRO, [00:45] MAIN CONTENT in chapters,\n\
                [09:00] CONCLUSION with recap and CTA.\n\n\
                Include [SHOW graphic of...] cues and [B-roll: ...] suggestions.\n\
                Target length: 8-10 minutes. Tone: conversational, energetic."
            }
            Self::FactChecker => {
                "You are a professional Fact-Checker and Research Analyst.\n\n\
                Your responsibilities:\n\
                1. Extract all factual claims from content\n\
                2. Verify each claim\n\
                3. Assign confidence scores (0-100%)\n\
                4. Provide source citations for verified claims\n\
                5. Flag unverified or questionable claims\n\n\
                Confidence guidelines: 90-100% multiple credible sources confirm,\n\
                70-89% single credible source, 50-69% partially confirmed or\n\
                outdated, below 50% cannot verify.\n\n\
                Output JSON:\n\
                {\"report\": \"Summary of results\", \"confidence\": 85,\n\
                 \"total_claims\": 12, \"verified_claims\": 10, \"flagged_claims\": 2,\n\
                 \"claims\": [{\"claim\": \"...\", \"verification\": \"verified\",\n\
                 \"confidence\": 95, \"sources\": [\"...\"], \"notes\": \"...\"}]}\n\n\
                Be thorough and conservative with confidence scores."
            }
            Self::Editor => {
                "You are a professional Content Editor and Copy Editor.\n\n\
                Your responsibilities:\n\
                1. Fix grammar, spelling, and punctuation errors\n\
                2. Improve readability and flow\n\
                3. Ensure brand voice consistency\n\
                4. Enhance clarity and conciseness\n\
                5. Maintain the original message and key points\n\n\
                Guidelines: target readability Grade 8-10 (Flesch-Kincaid),\n\
                active voice, short clear sentences, focused paragraphs\n\
                (3-4 sentences), remove redundancy.\n\n\
                Output: the edited content in the original format and structure.\n\
                Only make necessary improvements. Don't rewrite entirely."
            }
            Self::Seo => {
                "You are an SEO Specialist and Content Optimizer.\n\n\
                Your responsibilities:\n\
                1. Conduct keyword research\n\
                2. Optimize title and headers (H1, H2, H3)\n\
                3. Create a compelling meta description\n\
                4. Ensure keyword density (1-2%)\n\
                5. Calculate an SEO score\n\n\
                Best practices: title 50-60 characters with primary keyword,\n\
                meta description 150-160 characters, keywords used naturally\n\
                in H2/H3, no stuffing.\n\n\
                Output JSON:\n\
                {\"optimized_content\": \"...\", \"seo_score\": 85,\n\
                 \"keywords\": {\"primary\": \"...\", \"secondary\": [\"...\"]},\n\
                 \"meta_description\": \"...\", \"title_suggestion\": \"...\",\n\
                 \"improvements\": [\"...\"]}"
            }
            Self::Analytics => {
                "You are a Data Analyst and Content Performance Specialist.\n\n\
                Your responsibilities:\n\
                1. Analyze content performance patterns\n\
                2. Identify what works best (topics, formats, styles)\n\
                3. Provide actionable insights for improvement\n\
                4. Track trends over time\n\n\
                Output JSON:\n\
                {\"patterns\": [{\"pattern\": \"...\", \"confidence\": 85,\n\
                 \"recommendation\": \"...\"}],\n\
                 \"best_topics\": [\"...\"], \"optimal_length\": \"...\",\n\
                 \"insights\": \"Overall insights and recommendations\"}"
            }
        }
    }
}

/// Research prompt for a topic.
pub fn research_prompt(topic: &str) -> String {
    format!(
        "Conduct EXPERT-LEVEL research on: {topic}\n\n\
        Cover:\n\
        1. Recent incidents, breaches, case studies (last 6-12 months)\n\
        2. Specific statistics with sources\n\
        3. Expert analysis from credible sources\n\
        4. Contrarian perspectives\n\
        5. Real company examples\n\
        6. Actionable frameworks\n\n\
        Focus on concrete data, recent events, and practitioner insights.\n\n\
        Provide structured research in JSON format:\n\
        {{\n\
          \"brief\": \"Comprehensive research with specific details\",\n\
          \"key_insights\": [\"Insight with data\"],\n\
          \"statistics\": [\"Stat with source\"],\n\
          \"real_examples\": [\"Example with details\"],\n\
          \"sources\": [{{\"title\": \"...\", \"url\": \"...\", \"relevance\": \"...\"}}]\n\
        }}"
    )
}

/// Blog generation prompt built from the research brief and brand voice.
pub fn blog_prompt(brief: &str, voice: &BrandVoice) -> String {
    format!(
        "Write an EXPERT-LEVEL blog post using this research:\n\n\
        {brief}\n\n\
        Brand Voice: {}\n\
        Target length: {}\n\n\
        REQUIREMENTS:\n\
        1. Start with a powerful hook (specific stat, incident, or contrarian statement)\n\
        2. Provide deep insights: explain WHY things are happening\n\
        3. Be specific and actionable: real examples, actual data points, concrete frameworks\n\
        4. Include contrarian takes: what everyone gets wrong, what is overhyped\n\
        5. Write like an expert: confident, direct, strong opinions with reasoning\n\
        6. Format for readability: clear H1/H2/H3 structure, short paragraphs, bold key takeaways\n\n\
        Format: Markdown with proper headers.",
        voice.summary(),
        voice.preferences.target_length
    )
}

/// LinkedIn post generation prompt.
pub fn linkedin_prompt(brief: &str, voice: &BrandVoice) -> String {
    format!(
        "Create 3-5 LinkedIn posts based on this research:\n\n\
        {brief}\n\n\
        Brand Voice: {}\n\n\
        Make each post unique with different angles or hooks.",
        voice.tone
    )
}

/// Twitter thread generation prompt.
pub fn twitter_prompt(brief: &str, voice: &BrandVoice) -> String {
    format!(
        "Create 5-8 Twitter threads based on this research:\n\n\
        {brief}\n\n\
        Brand Voice: {}\n\n\
        Make each thread viral-worthy with strong hooks.",
        voice.tone
    )
}

/// Email newsletter generation prompt.
pub fn email_prompt(brief: &str, voice: &BrandVoice) -> String {
    format!(
        "Create an email newsletter based on this research:\n\n\
        {brief}\n\n\
        Brand Voice: {}\n\n\
        Include:\n\
        - 5 subject line options\n\
        - Preview text\n\
        - Complete email body (300-500 words)\n\
        - Clear CTA\n\
        - P.S. section\n\n\
        Make it conversion-focused and engaging.",
        voice.tone
    )
}

/// Video script generation prompt.
pub fn video_prompt(brief: &str, voice: &BrandVoice) -> String {
    format!(
        "Create a YouTube video script based on this research:\n\n\
        {brief}\n\n\
        Brand Voice: {}\n\n\
        Requirements:\n\
        - 8-10 minute video\n\
        - Strong hook (first 15 seconds)\n\
        - Chapter timestamps\n\
        - Visual cues and B-roll suggestions\n\
        - Conversational, spoken language\n\
        - Strong CTA at end\n\n\
        Make it engaging and viewer-retention focused.",
        voice.tone
    )
}

/// Fact-checking prompt over finished content.
pub fn fact_check_prompt(content: &str) -> String {
    format!(
        "Fact-check the following content:\n\n\
        {content}\n\n\
        Tasks:\n\
        1. Extract all factual claims (statistics, dates, names, events)\n\
        2. Verify each claim\n\
        3. Assign confidence scores\n\
        4. Provide sources for verified claims\n\
        5. Flag any unverified or questionable claims\n\n\
        Provide a detailed verification report in JSON format."
    )
}

/// Editing prompt with brand voice guidelines.
pub fn edit_prompt(content: &str, voice: &BrandVoice) -> String {
    format!(
        "Edit and improve the following content:\n\n\
        {content}\n\n\
        Brand Voice: {}\n\n\
        Tasks:\n\
        1. Fix all grammar and spelling errors\n\
        2. Improve readability (target: Grade 8-10)\n\
        3. Ensure brand voice consistency\n\
        4. Enhance clarity and flow\n\
        5. Keep the core message intact\n\n\
        Provide the edited version.",
        voice.summary()
    )
}

/// SEO optimization prompt for content on a topic.
pub fn seo_prompt(content: &str, topic: &str) -> String {
    format!(
        "Optimize this content for SEO:\n\n\
        Topic/Primary Keyword: {topic}\n\n\
        Content:\n\
        {content}\n\n\
        Tasks:\n\
        1. Identify related keywords\n\
        2. Optimize title, headers, and content\n\
        3. Create a meta description\n\
        4. Calculate an SEO score (0-100)\n\
        5. Provide a list of improvements\n\n\
        Return results in JSON format as specified."
    )
}

/// Analytics prompt over a summarized content history.
pub fn analytics_prompt(history_summary: &str) -> String {
    format!(
        "Analyze this content performance data and identify patterns:\n\n\
        Content History:\n\
        {history_summary}\n\n\
        Tasks:\n\
        1. Identify patterns in successful content\n\
        2. Determine optimal content characteristics\n\
        3. Find trends over time\n\
        4. Provide actionable recommendations\n\n\
        Return analysis in JSON format."
    )
}
