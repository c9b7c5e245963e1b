//! # Textos de Referência e Demonstração
//!
//! Amostras curtas de texto corrido para cada idioma do catálogo. O modelo
//! n-gram ([`crate::model::NgramLanguageModel`]) constrói um perfil de trigramas
//! por idioma a partir delas na inicialização; nada é treinado fora daqui.
//!
//! ## Composição
//!
//! - Para cada idioma, a primeira amostra é o artigo 1 da Declaração Universal
//!   dos Direitos Humanos; as demais são frases do dia a dia.
//! - Inglês e português têm amostras extras com vocabulário erudito de raiz
//!   latina: textos pseudo-latinos (lorem ipsum) compartilham muitos trigramas
//!   com esse vocabulário.
//! - As escritas não latinas precisam de pouco texto, porque o histograma de
//!   escritas já separa esses idiomas.

use crate::language::Language;

/// Uma amostra de texto de referência para um idioma.
pub struct ReferenceSample {
    pub language: Language,
    /// Texto corrido, sem anotação.
    pub text: &'static str,
}

/// Retorna todas as amostras de referência, agrupadas por idioma na ordem do catálogo.
pub fn reference_samples() -> Vec<ReferenceSample> {
    vec![
        // ===== ENGLISH =====
        ReferenceSample {
            language: Language::English,
            text: "All human beings are born free and equal in dignity and rights. They are endowed with reason and conscience and should act towards one another in a spirit of brotherhood.",
        },
        ReferenceSample {
            language: Language::English,
            text: "The quick brown fox jumps over the lazy dog while the children watch from the window of the house.",
        },
        ReferenceSample {
            language: Language::English,
            text: "I can not go to the city this year because I do not have my ticket, but my friends will travel there in the summer.",
        },
        ReferenceSample {
            language: Language::English,
            text: "This is the best way to learn a new language: read every day, write short notes, and speak with people who know it well.",
        },
        ReferenceSample {
            language: Language::English,
            text: "We were thinking about what they would say when the news reached the town, and nobody knew how to answer the question.",
        },
        ReferenceSample {
            language: Language::English,
            text: "The commission will examine the definitions and the principles of the constitution, and the senate must deliberate on every amendment.",
        },
        ReferenceSample {
            language: Language::English,
            text: "An erudite orator offered a solemn oration on liberty, equity and the common interest of the nation, citing ancient authors in their original Latin.",
        },
        ReferenceSample {
            language: Language::English,
            text: "Persecution, corruption and malicious intent are condemned by the tribunal, which reprehends any abuse of public office.",
        },
        ReferenceSample {
            language: Language::English,
            text: "The instructor explicated the consequences of the verdict with patience, and the audience applauded the elegant disputation.",
        },
        ReferenceSample {
            language: Language::English,
            text: "Democratic institutions depend on informed citizens, transparent procedures, and a volume of accurate information.",
        },
        ReferenceSample {
            language: Language::English,
            text: "Ancient scribes copied the manuscripts of the philosophers, and a modest museum now preserves the delicate volumes for the public.",
        },
        ReferenceSample {
            language: Language::English,
            text: "The minimum quantum of evidence, the maximum sentence and the curriculum of the academy are defined in the statutes.",
        },
        ReferenceSample {
            language: Language::English,
            text: "Hello world, hello everyone, and welcome to the new school year.",
        },
        ReferenceSample {
            language: Language::English,
            text: "Eminent scholars reformed the university and restored its ancient reputation for excellence in science, medicine and jurisprudence.",
        },
        ReferenceSample {
            language: Language::English,
            text: "The curator and the sculptor debated the origin of the statue, its antique pedestal and the Latin inscription on its base.",
        },
        ReferenceSample {
            language: Language::English,
            text: "Tradition, religion and art were the common inheritance of every province, from the capital to the humblest rural parish.",
        },
        ReferenceSample {
            language: Language::English,
            text: "Several delegates petitioned the council to postpone the vote until the evidence could be examined with greater prudence.",
        },
        // ===== FRENCH =====
        ReferenceSample {
            language: Language::French,
            text: "Tous les êtres humains naissent libres et égaux en dignité et en droits. Ils sont doués de raison et de conscience et doivent agir les uns envers les autres dans un esprit de fraternité.",
        },
        ReferenceSample {
            language: Language::French,
            text: "Le renard brun rapide saute par dessus le chien paresseux pendant que les enfants regardent depuis la fenêtre de la maison.",
        },
        ReferenceSample {
            language: Language::French,
            text: "Je ne peux pas aller à la ville cette année parce que je n'ai pas mon billet, mais mes amis vont voyager là bas en été.",
        },
        ReferenceSample {
            language: Language::French,
            text: "C'est la meilleure façon d'apprendre une nouvelle langue : lire chaque jour, écrire de petites notes et parler avec des gens qui la connaissent bien.",
        },
        // ===== GERMAN =====
        ReferenceSample {
            language: Language::German,
            text: "Alle Menschen sind frei und gleich an Würde und Rechten geboren. Sie sind mit Vernunft und Gewissen begabt und sollen einander im Geist der Brüderlichkeit begegnen.",
        },
        ReferenceSample {
            language: Language::German,
            text: "Der schnelle braune Fuchs springt über den faulen Hund, während die Kinder aus dem Fenster des Hauses schauen.",
        },
        ReferenceSample {
            language: Language::German,
            text: "Ich kann dieses Jahr nicht in die Stadt fahren, weil ich meine Fahrkarte nicht habe, aber meine Freunde reisen im Sommer dorthin.",
        },
        ReferenceSample {
            language: Language::German,
            text: "Das ist der beste Weg, eine neue Sprache zu lernen: jeden Tag lesen, kurze Notizen schreiben und mit Menschen sprechen, die sie gut kennen.",
        },
        // ===== SPANISH =====
        ReferenceSample {
            language: Language::Spanish,
            text: "Todos los seres humanos nacen libres e iguales en dignidad y derechos y, dotados como están de razón y conciencia, deben comportarse fraternalmente los unos con los otros.",
        },
        ReferenceSample {
            language: Language::Spanish,
            text: "El rápido zorro marrón salta sobre el perro perezoso mientras los niños miran desde la ventana de la casa.",
        },
        ReferenceSample {
            language: Language::Spanish,
            text: "No puedo ir a la ciudad este año porque no tengo mi billete, pero mis amigos van a viajar allí en verano.",
        },
        ReferenceSample {
            language: Language::Spanish,
            text: "Esta es la mejor manera de aprender un idioma nuevo: leer todos los días, escribir notas cortas y hablar con personas que lo conocen bien.",
        },
        // ===== ITALIAN =====
        ReferenceSample {
            language: Language::Italian,
            text: "Tutti gli esseri umani nascono liberi ed eguali in dignità e diritti. Essi sono dotati di ragione e di coscienza e devono agire gli uni verso gli altri in spirito di fratellanza.",
        },
        ReferenceSample {
            language: Language::Italian,
            text: "La veloce volpe marrone salta sopra il cane pigro mentre i bambini guardano dalla finestra della casa.",
        },
        ReferenceSample {
            language: Language::Italian,
            text: "Non posso andare in città quest'anno perché non ho il mio biglietto, ma i miei amici viaggeranno là in estate.",
        },
        // ===== PORTUGUESE =====
        ReferenceSample {
            language: Language::Portuguese,
            text: "Todos os seres humanos nascem livres e iguais em dignidade e em direitos. Dotados de razão e de consciência, devem agir uns para com os outros em espírito de fraternidade.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "A raposa marrom rápida pula sobre o cão preguiçoso enquanto as crianças observam da janela da casa.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "Eu não posso ir à cidade este ano porque não tenho o meu bilhete, mas os meus amigos vão viajar para lá no verão.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "Esta é a melhor maneira de aprender uma nova língua: ler todos os dias, escrever pequenas notas e falar com pessoas que a conhecem bem.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "Quando eles chegaram à praça, os músicos tocavam e as pessoas cantavam com alegria até o fim da tarde.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "Os alunos estudam latim e leem os autores antigos, que escreveram sobre a natureza, a moral e a justiça.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "Nunca se sabe quem vem nem quando volta, mas sempre esperamos que tudo corra bem para todos.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "Um homem sábio aprende com o passado e prepara o futuro com paciência, prudência e coragem.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "Se não chover amanhã, iremos ao mercado comprar frutas, legumes e pão fresco para o almoço de domingo.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "As meninas cantam e dançam na escola, enquanto os meninos jogam futebol e correm atrás da bola.",
        },
        ReferenceSample {
            language: Language::Portuguese,
            text: "Nenhum aluno perguntou quanto tempo ficaram no mundo antigo, mas todos sentem que algum dia voltarão ao período comum.",
        },
        // ===== DUTCH =====
        ReferenceSample {
            language: Language::Dutch,
            text: "Alle mensen worden vrij en gelijk in waardigheid en rechten geboren. Zij zijn begiftigd met verstand en geweten, en behoren zich jegens elkander in een geest van broederschap te gedragen.",
        },
        ReferenceSample {
            language: Language::Dutch,
            text: "De snelle bruine vos springt over de luie hond terwijl de kinderen vanuit het raam van het huis kijken.",
        },
        ReferenceSample {
            language: Language::Dutch,
            text: "Ik kan dit jaar niet naar de stad gaan omdat ik mijn kaartje niet heb, maar mijn vrienden reizen er in de zomer naartoe.",
        },
        // ===== JAPANESE =====
        ReferenceSample {
            language: Language::Japanese,
            text: "すべての人間は、生まれながらにして自由であり、かつ、尊厳と権利とについて平等である。人間は、理性と良心とを授けられており、互いに同胞の精神をもって行動しなければならない。",
        },
        ReferenceSample {
            language: Language::Japanese,
            text: "今日はみんなでやっていきましょう。これから一緒に頑張っていきたいと思います。",
        },
        ReferenceSample {
            language: Language::Japanese,
            text: "私は今年その町に行くことができません。切符を持っていないからです。",
        },
        // ===== SIMPLIFIEDCHINESE =====
        ReferenceSample {
            language: Language::SimplifiedChinese,
            text: "人人生而自由，在尊严和权利上一律平等。他们赋有理性和良心，并应以兄弟关系的精神相对待。",
        },
        ReferenceSample {
            language: Language::SimplifiedChinese,
            text: "我今年不能去那个城市，因为我没有票，但是我的朋友们夏天会去那里旅行。",
        },
        // ===== KOREAN =====
        ReferenceSample {
            language: Language::Korean,
            text: "모든 인간은 태어날 때부터 자유로우며 그 존엄과 권리에 있어 동등하다. 인간은 천부적으로 이성과 양심을 부여받았으며 서로 형제애의 정신으로 행동하여야 한다.",
        },
        ReferenceSample {
            language: Language::Korean,
            text: "안녕하세요 여러분, 오늘도 좋은 하루 보내세요.",
        },
        // ===== RUSSIAN =====
        ReferenceSample {
            language: Language::Russian,
            text: "Все люди рождаются свободными и равными в своем достоинстве и правах. Они наделены разумом и совестью и должны поступать в отношении друг друга в духе братства.",
        },
        // ===== GREEK =====
        ReferenceSample {
            language: Language::Greek,
            text: "Όλοι οι άνθρωποι γεννιούνται ελεύθεροι και ίσοι στην αξιοπρέπεια και τα δικαιώματα. Είναι προικισμένοι με λογική και συνείδηση, και οφείλουν να συμπεριφέρονται μεταξύ τους με πνεύμα αδελφοσύνης.",
        },
        // ===== ARABIC =====
        ReferenceSample {
            language: Language::Arabic,
            text: "يولد جميع الناس أحرارًا متساوين في الكرامة والحقوق. وقد وهبوا عقلاً وضميرًا وعليهم أن يعامل بعضهم بعضًا بروح الإخاء.",
        },
        // ===== HEBREW =====
        ReferenceSample {
            language: Language::Hebrew,
            text: "כל בני האדם נולדו בני חורין ושווים בערכם ובזכויותיהם. כולם חוננו בתבונה ובמצפון, לפיכך חובה עליהם לנהוג איש ברעהו ברוח של אחווה.",
        },
        // ===== THAI =====
        ReferenceSample {
            language: Language::Thai,
            text: "มนุษย์ทั้งหลายเกิดมามีอิสระและเสมอภาคกันในเกียรติศักด์และสิทธิ ต่างมีเหตุผลและมโนธรรม และควรปฏิบัติต่อกันด้วยเจตนารมณ์แห่งภราดรภาพ",
        },

    ]
}

/// Texto de referência de um idioma (amostras unidas por quebra de linha).
pub fn reference_text(language: Language) -> String {
    reference_samples()
        .into_iter()
        .filter(|s| s.language == language)
        .map(|s| s.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Texto pseudo-latino de cinco parágrafos separados por linhas em branco.
pub const LOREM_IPSUM: &str = r"Lorem ipsum dolor sit amet, has atqui numquam qualisque id, mei et tantas posidonium, eu habeo forensibus definitiones sed. Deserunt interesset reprehendunt ne per, nonumy ornatus antiopam ei mea. Sapientem constituto neglegentur an pro, oratio equidem pro cu. Salutatus comprehensam eu qui, aperiam volutpat scripserit per ut. At per scribentur accommodare, ea eam viderer definitiones.

Ut iudico scaevola mnesarchum sit, usu ipsum deserunt ne. Et nibh intellegat per, stet verterem ex eam, cum ad laudem vocent. Velit soluta sed cu, cu duo semper inermis graecis. Ex labores evertitur sed.

No modus reque semper nam, affert quodsi in per. Vim eu unum delenit, eum eu option iuvaret aliquid. Te qui albucius offendit definitionem, usu putant detraxit reformidans te, in mei delectus volutpat. Has natum aliquid principes id, ad est eruditi mnesarchum.

An audire volutpat pro, vel no wisi audiam nostrum. Quo vocent insolens an, mollis disputando liberavisse an sea. Cetero intellegam ius id, in sint habeo dolores vis, stet malorum eripuit ei eos. In usu modus corrumpit persequeris, atqui apeirian consequuntur nam ne, mutat dictas eos et.

Audire omnesque mei at, et vide maluisset similique has. Cu unum instructior nec, lucilius perfecto explicari sea at, lorem dolor munere quo ex. Eos ei paulo congue fabellas, vel cu reque putant expetendis, eum id clita facilisi. Mei euismod legendos an, et option pertinax mel. Eu usu solum latine deseruisse, quando recusabo in vis, eum ea saperet cotidieque. Mutat dolores democritum ut sit.";

/// Textos de demonstração para a API web
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Lorem ipsum", LOREM_IPSUM),
        (
            "Contrações",
            "I can't go San Jose this year due to not have my ticket.",
        ),
        ("Japonês", "今日はみんなでやっていきましょう。"),
        (
            "Multilíngue",
            "Bonjour tout le monde, comment allez-vous aujourd'hui ?\nEu não sei se vou conseguir chegar a tempo para o jantar.\nDer Hund schläft unter dem Tisch in der Küche.",
        ),
        (
            "Sentenças",
            "Dr. Smith arrived at 3.14 and said \"hello.\" Nobody answered!\nA new line starts a new sentence",
        ),
        ("Escritas", "Все люди рождаются свободными. 我的朋友们今年夏天去旅行。 안녕하세요 여러분"),
    ]
}
