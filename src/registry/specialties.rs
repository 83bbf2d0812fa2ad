use serde::Serialize;

use crate::models::Profile;

#[derive(Debug, Clone, Serialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl Faq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A specialty landing topic such as `christian` or `gottman`
#[derive(Debug, Clone, Serialize)]
pub struct Specialty {
    pub slug: String,
    pub name: String,
    pub title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub filter_terms: Vec<String>,
    pub faqs: Vec<Faq>,
}

impl Specialty {
    /// Whether a profile qualifies for this specialty
    ///
    /// A profile qualifies when its bio mentions any filter term
    /// (case-insensitive) or its specialty list contains one.
    pub fn matches_profile(&self, profile: &Profile) -> bool {
        let bio = profile.bio.as_deref().unwrap_or_default().to_lowercase();

        self.filter_terms.iter().any(|term| {
            let term_lower = term.to_lowercase();
            bio.contains(&term_lower)
                || profile
                    .specialties
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(term))
        })
    }
}

#[derive(Debug, Clone)]
pub struct SpecialtyRegistry {
    specialties: Vec<Specialty>,
}

impl SpecialtyRegistry {
    pub fn new(specialties: Vec<Specialty>) -> Self {
        Self { specialties }
    }

    pub fn builtin() -> Self {
        let specialties = SPECIALTIES
            .iter()
            .map(|row| Specialty {
                slug: row.slug.to_string(),
                name: row.name.to_string(),
                title: row.title.to_string(),
                meta_description: row.meta_description.to_string(),
                keywords: row.keywords.iter().map(|k| k.to_string()).collect(),
                filter_terms: row.filter_terms.iter().map(|t| t.to_string()).collect(),
                faqs: row.faqs.iter().map(|(q, a)| Faq::new(*q, *a)).collect(),
            })
            .collect();

        Self::new(specialties)
    }

    pub fn all(&self) -> &[Specialty] {
        &self.specialties
    }

    /// Exact slug match
    pub fn by_slug(&self, slug: &str) -> Option<&Specialty> {
        self.specialties.iter().find(|s| s.slug == slug)
    }

    pub fn is_specialty(&self, slug: &str) -> bool {
        self.by_slug(slug).is_some()
    }
}

struct SpecialtyRow {
    slug: &'static str,
    name: &'static str,
    title: &'static str,
    meta_description: &'static str,
    keywords: &'static [&'static str],
    filter_terms: &'static [&'static str],
    faqs: &'static [(&'static str, &'static str)],
}

const SPECIALTIES: &[SpecialtyRow] = &[
    SpecialtyRow {
        slug: "christian",
        name: "Christian",
        title: "Christian Premarital Counseling",
        meta_description: "Find Christian premarital counselors who integrate faith and scripture into marriage preparation. Bible-based counseling for engaged couples.",
        keywords: &["christian premarital counseling", "faith-based marriage counseling", "bible-based couples counseling", "christian marriage preparation"],
        filter_terms: &["Christian", "Faith-Based", "Biblical", "Church", "Pastor", "Clergy", "Ministry"],
        faqs: &[
            ("What makes Christian premarital counseling different?",
             "Christian premarital counseling integrates Biblical principles, prayer, and spiritual guidance alongside evidence-based relationship techniques. Counselors help couples align their marriage with their faith values."),
            ("Do we need to attend the same church as our counselor?",
             "No, you can work with any Christian counselor whose approach resonates with you. Many couples choose counselors from different denominations or non-denominational Christian therapists."),
            ("Is Christian premarital counseling only for religious couples?",
             "While designed for couples who want faith integrated into their preparation, many Christian counselors also offer secular approaches if preferred."),
        ],
    },
    SpecialtyRow {
        slug: "catholic",
        name: "Catholic Pre-Cana",
        title: "Catholic Pre-Cana Classes",
        meta_description: "Find Catholic Pre-Cana programs and marriage preparation classes required by the Church. FOCCUS inventory, Engaged Encounter, and parish programs.",
        keywords: &["pre-cana classes", "catholic marriage preparation", "catholic premarital counseling", "foccus inventory", "engaged encounter"],
        filter_terms: &["Catholic", "Pre-Cana", "FOCCUS", "Engaged Encounter", "Parish", "Sacrament"],
        faqs: &[
            ("Is Pre-Cana required to get married in the Catholic Church?",
             "Yes, the Catholic Church requires marriage preparation (Pre-Cana) before the Sacrament of Marriage. Requirements vary by diocese but typically include classes, inventory assessments, and meetings with a priest or deacon."),
            ("How long does Catholic marriage preparation take?",
             "Most dioceses require 6-12 months of preparation. This includes Pre-Cana classes (weekend or weekly), FOCCUS inventory sessions, and meetings with your parish priest."),
            ("What is the FOCCUS inventory?",
             "FOCCUS (Facilitating Open Couple Communication, Understanding, and Study) is a pre-marriage inventory used by many Catholic parishes to help couples explore their relationship and identify areas for growth."),
        ],
    },
    SpecialtyRow {
        slug: "lgbtq",
        name: "LGBTQ+ Affirming",
        title: "LGBTQ+ Affirming Premarital Counseling",
        meta_description: "Find LGBTQ+ affirming premarital counselors who celebrate and support same-sex couples and queer relationships. Inclusive, welcoming marriage preparation.",
        keywords: &["lgbtq premarital counseling", "gay couples counseling", "same-sex marriage preparation", "queer affirming therapist", "lgbtq friendly counselor"],
        filter_terms: &["LGBTQ+", "LGBTQ", "Gay", "Lesbian", "Queer", "Affirming", "Same-Sex", "Inclusive"],
        faqs: &[
            ("What does \"affirming\" mean in LGBTQ+ counseling?",
             "Affirming counselors fully support and celebrate LGBTQ+ identities and relationships. They don't view being LGBTQ+ as something to change or overcome, but as a natural part of who you are."),
            ("Will an affirming counselor understand our unique challenges?",
             "Yes, LGBTQ+ affirming counselors are trained in the specific experiences of queer couples, including navigating family acceptance, legal considerations, and building chosen family support systems."),
            ("Do we need a counselor who is also LGBTQ+?",
             "Not necessarily. Many excellent affirming counselors are allies who have specialized training in LGBTQ+ issues. The most important factor is finding someone whose approach feels supportive and understanding."),
        ],
    },
    SpecialtyRow {
        slug: "online",
        name: "Online/Virtual",
        title: "Online Premarital Counseling",
        meta_description: "Find online premarital counseling and virtual marriage preparation programs. Video sessions, flexible scheduling, and couples anywhere can participate.",
        keywords: &["online premarital counseling", "virtual marriage counseling", "telehealth couples therapy", "remote premarital preparation", "video premarital counseling"],
        filter_terms: &["Online", "Virtual", "Telehealth", "Video", "Remote"],
        faqs: &[
            ("Is online premarital counseling as effective as in-person?",
             "Research shows that online therapy is equally effective as in-person sessions for couples counseling. Many couples actually prefer the comfort and convenience of meeting from home."),
            ("What technology do we need for online counseling?",
             "You'll need a device with a camera and microphone (computer, tablet, or phone), stable internet connection, and a private space. Most counselors use secure video platforms like Zoom or dedicated telehealth software."),
            ("Can we do online counseling if we're in a long-distance relationship?",
             "Absolutely! Online counseling is ideal for long-distance couples. You can each join from your own location, or join together when visiting each other."),
        ],
    },
    SpecialtyRow {
        slug: "gottman",
        name: "Gottman Method",
        title: "Gottman Method Premarital Counseling",
        meta_description: "Find Gottman-trained premarital counselors using the research-backed Sound Relationship House method. Evidence-based marriage preparation.",
        keywords: &["gottman method counseling", "gottman premarital", "sound relationship house", "gottman certified therapist", "research-based marriage counseling"],
        filter_terms: &["Gottman", "Sound Relationship House", "Research-Based", "Evidence-Based"],
        faqs: &[
            ("What is the Gottman Method?",
             "The Gottman Method is a research-based approach to couples therapy developed by Drs. John and Julie Gottman. It focuses on building friendship, managing conflict constructively, and creating shared meaning in relationships."),
            ("What is the Sound Relationship House?",
             "The Sound Relationship House is the Gottman Method's framework for healthy relationships. It includes building love maps, sharing fondness and admiration, turning toward each other, and managing conflict."),
            ("How do I find a certified Gottman therapist?",
             "Look for counselors who are \"Gottman-trained\" or \"Gottman Certified Therapists.\" Certification requires extensive training and demonstrates expertise in the method."),
        ],
    },
    SpecialtyRow {
        slug: "prepare-enrich",
        name: "PREPARE/ENRICH",
        title: "PREPARE/ENRICH Premarital Counseling",
        meta_description: "Find PREPARE/ENRICH certified facilitators for research-based premarital assessment. Identify strengths and growth areas before marriage.",
        keywords: &["prepare enrich counseling", "prepare enrich facilitator", "premarital assessment", "prepare enrich premarital", "relationship inventory"],
        filter_terms: &["PREPARE/ENRICH", "Prepare-Enrich", "PREPARE", "Assessment", "Inventory"],
        faqs: &[
            ("What is PREPARE/ENRICH?",
             "PREPARE/ENRICH is a research-based assessment tool that helps couples identify their relationship strengths and areas for growth. It covers topics like communication, conflict resolution, finances, and expectations."),
            ("How does PREPARE/ENRICH work?",
             "Each partner completes an online questionnaire separately. A certified facilitator then reviews the results with you, helping you understand your compatibility and guiding discussions on key relationship topics."),
            ("Is PREPARE/ENRICH only for engaged couples?",
             "No, there are versions for dating couples (PREPARE), engaged couples (PREPARE), and married couples (ENRICH). The assessment is tailored to your relationship stage."),
        ],
    },
    SpecialtyRow {
        slug: "interfaith",
        name: "Interfaith Couples",
        title: "Interfaith Premarital Counseling",
        meta_description: "Find premarital counselors experienced with interfaith couples. Navigate religious differences, blended traditions, and family expectations.",
        keywords: &["interfaith premarital counseling", "mixed religion couples", "interfaith marriage counseling", "multi-faith couples therapy"],
        filter_terms: &["Interfaith", "Multi-Faith", "Mixed Religion", "Interreligious"],
        faqs: &[
            ("What challenges do interfaith couples face?",
             "Common challenges include deciding which traditions to follow, managing family expectations, discussing how to raise children, and creating shared spiritual practices that honor both faiths."),
            ("Should our counselor share our faith backgrounds?",
             "Not necessarily. The most important factor is finding a counselor experienced with interfaith couples who can help you navigate differences respectfully, regardless of their own faith."),
            ("How can we honor both of our religious traditions?",
             "Many interfaith couples create blended practices, celebrate both sets of holidays, or choose elements from each tradition that feel meaningful. A counselor can help you explore what works for your relationship."),
        ],
    },
    SpecialtyRow {
        slug: "second-marriages",
        name: "Second Marriages",
        title: "Premarital Counseling for Second Marriages",
        meta_description: "Find premarital counselors experienced with second marriages, remarriage, and blended families. Address past patterns and build a stronger future.",
        keywords: &["second marriage counseling", "remarriage counseling", "premarital counseling remarriage", "blended family counseling"],
        filter_terms: &["Second Marriage", "Remarriage", "Blended Family", "Divorced", "Widowed"],
        faqs: &[
            ("Why is premarital counseling important for second marriages?",
             "Second marriages have a higher divorce rate than first marriages, often due to unresolved patterns from the past. Counseling helps you understand what went wrong before and build healthier patterns this time."),
            ("Will counseling address blended family issues?",
             "Yes, counselors experienced with second marriages typically address stepparenting, co-parenting with exes, children's adjustment, and creating family unity while respecting existing bonds."),
            ("How is counseling different for remarriage?",
             "Remarriage counseling addresses more complex topics: processing grief or divorce, managing relationships with ex-spouses, integrating children, combining households, and avoiding past mistakes."),
        ],
    },
    SpecialtyRow {
        slug: "military",
        name: "Military Couples",
        title: "Military Premarital Counseling",
        meta_description: "Find premarital counselors experienced with military couples. Navigate deployments, relocations, and unique military lifestyle challenges.",
        keywords: &["military premarital counseling", "military couples therapy", "army marriage counseling", "military family counseling"],
        filter_terms: &["Military", "Veteran", "Armed Forces", "Army", "Navy", "Air Force", "Marines"],
        faqs: &[
            ("Do military couples face unique challenges?",
             "Yes, military couples navigate frequent moves, deployments, long separations, and the unique stresses of military culture. Counseling helps you prepare for these challenges together."),
            ("Is military premarital counseling covered by TRICARE?",
             "TRICARE may cover some counseling services. Many military bases also offer free chaplain services and Military OneSource provides free counseling sessions for service members and families."),
            ("Can we do counseling during deployment?",
             "Yes, online counseling makes it possible to continue sessions even during deployment. Many military-experienced counselors offer flexible virtual options."),
        ],
    },
    SpecialtyRow {
        slug: "affordable",
        name: "Affordable/Sliding Scale",
        title: "Affordable Premarital Counseling",
        meta_description: "Find affordable premarital counseling with sliding scale fees, low-cost options, and free programs. Marriage preparation for every budget.",
        keywords: &["affordable premarital counseling", "cheap premarital counseling", "free premarital counseling", "sliding scale couples counseling", "low cost marriage counseling"],
        filter_terms: &["Sliding Scale", "Affordable", "Low Cost", "Free", "Reduced Fee"],
        faqs: &[
            ("What is sliding scale pricing?",
             "Sliding scale means the counselor adjusts their fee based on your income. You may pay less than the standard rate if you have financial constraints, making counseling accessible regardless of budget."),
            ("Are there free premarital counseling options?",
             "Yes! Many churches offer free or low-cost premarital counseling. University training clinics, community mental health centers, and some nonprofit organizations also provide affordable options."),
            ("Is affordable counseling lower quality?",
             "Not at all. Many excellent counselors offer sliding scale fees as part of their practice. Training clinics provide services by supervised graduate students who are often highly motivated and well-trained."),
        ],
    },
];
