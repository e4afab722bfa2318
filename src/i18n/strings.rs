/// Canned replies used when the LLM backend is unavailable or unusable.
///
/// Placeholders: `{message}` is replaced with the user's message.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    /// Reply to greetings
    pub greeting: &'static str,

    /// Reply to translation requests that could not be served
    pub translation_help: &'static str,

    /// Reply describing what the assistant can do
    pub capabilities: &'static str,

    /// Reply about equality and SDG 10
    pub sdg_equality: &'static str,

    /// Reply to questions. Placeholders: {message}
    pub question: &'static str,

    /// Reply to anything else. Placeholders: {message}
    pub default_reply: &'static str,
}

impl LanguageStrings {
    /// Fill the `{message}` placeholder
    pub fn render(template: &str, message: &str) -> String {
        template.replace("{message}", message)
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    greeting: "Hello! I'm your Universal Language Support Assistant. I can help you with questions, \
translations, and information about equality and inclusion. What would you like to know?",

    translation_help: "I can help you translate text between multiple languages! Just tell me what \
you'd like to translate and which language you want it in. For example: 'Translate Hello to Spanish' \
or 'Convert this text to French: [your text]'.",

    capabilities: "I can help you with: 1) Answering questions on various topics, 2) Translating \
between 19 languages, 3) Voice input and output, 4) Information about equality and reducing \
inequalities (SDG 10), 5) Cross-cultural communication. What would you like assistance with?",

    sdg_equality: "SDG 10 aims to reduce inequalities within and among countries. This includes \
promoting equal opportunities, fighting discrimination, and ensuring inclusive participation in \
society. I can help you understand specific aspects of inequality or suggest ways to promote \
equality. What would you like to know?",

    question: "I understand you're asking about '{message}'. While I can help with many topics \
including translations, equality issues, and general questions, I'd be happy to provide more \
specific information if you could rephrase your question. What exactly would you like to know?",

    default_reply: "Thank you for your message: '{message}'. I'm here to help with translations, \
answer questions, and provide information about equality and inclusion. Could you please let me \
know specifically how I can assist you today?",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    greeting: "¡Hola! Soy tu Asistente Universal de Soporte de Idiomas. Puedo ayudarte con \
preguntas, traducciones e información sobre igualdad e inclusión. ¿Qué te gustaría saber?",

    translation_help: "¡Puedo ayudarte a traducir texto entre múltiples idiomas! Solo dime qué te \
gustaría traducir y en qué idioma lo quieres. Por ejemplo: 'Traduce Hola al inglés'.",

    capabilities: "Puedo ayudarte con: 1) Responder preguntas sobre varios temas, 2) Traducir entre \
19 idiomas, 3) Entrada y salida de voz, 4) Información sobre igualdad y reducción de desigualdades \
(ODS 10), 5) Comunicación intercultural.",

    sdg_equality: "El ODS 10 tiene como objetivo reducir las desigualdades dentro y entre países. \
Esto incluye promover la igualdad de oportunidades, combatir la discriminación y asegurar la \
participación inclusiva en la sociedad.",

    question: "Entiendo que estás preguntando sobre '{message}'. Aunque puedo ayudar con muchos \
temas incluyendo traducciones, cuestiones de igualdad y preguntas generales, estaría feliz de \
proporcionar información más específica.",

    default_reply: "Gracias por tu mensaje: '{message}'. Estoy aquí para ayudar con traducciones, \
responder preguntas y proporcionar información sobre igualdad e inclusión. ¿Podrías decirme \
específicamente cómo puedo ayudarte hoy?",
};

// ==================== French Strings ====================

pub const FRENCH_STRINGS: LanguageStrings = LanguageStrings {
    greeting: "Bonjour! Je suis votre Assistant Universel de Support Linguistique. Je peux vous \
aider avec des questions, des traductions et des informations sur l'égalité et l'inclusion. Que \
voulez-vous savoir?",

    translation_help: "Je peux vous aider à traduire du texte entre plusieurs langues! Dites-moi \
simplement ce que vous aimeriez traduire et dans quelle langue vous le voulez.",

    capabilities: "Je peux vous aider avec: 1) Répondre aux questions sur divers sujets, 2) \
Traduire entre 19 langues, 3) Entrée et sortie vocales, 4) Informations sur l'égalité et la \
réduction des inégalités (ODD 10), 5) Communication interculturelle.",

    sdg_equality: "L'ODD 10 vise à réduire les inégalités au sein des pays et entre eux. Cela \
inclut la promotion de l'égalité des chances, la lutte contre la discrimination et la participation \
inclusive dans la société.",

    question: "Je comprends que vous posez une question sur '{message}'. Bien que je puisse aider \
avec de nombreux sujets, je serais heureux de fournir des informations plus spécifiques.",

    default_reply: "Merci pour votre message: '{message}'. Je suis là pour aider avec les \
traductions, répondre aux questions et fournir des informations sur l'égalité et l'inclusion. \
Pourriez-vous me dire spécifiquement comment je peux vous aider aujourd'hui?",
};

// ==================== Hindi Strings ====================

pub const HINDI_STRINGS: LanguageStrings = LanguageStrings {
    greeting: "नमस्ते! मैं आपका यूनिवर्सल भाषा सहायता सहायक हूं। मैं आपको प्रश्नों, अनुवादों और समानता \
तथा समावेश के बारे में जानकारी के साथ मदद कर सकता हूं।",

    translation_help: "मैं कई भाषाओं के बीच पाठ का अनुवाद करने में आपकी मदद कर सकता हूं! बस मुझे बताएं कि \
आप क्या अनुवाद करना चाहते हैं और किस भाषा में।",

    capabilities: "मैं आपकी इनमें मदद कर सकता हूं: 1) विभिन्न विषयों पर प्रश्नों के उत्तर, 2) 19 भाषाओं के \
बीच अनुवाद, 3) आवाज़ इनपुट और आउटपुट, 4) समानता और असमानता कम करने (SDG 10) की जानकारी, 5) \
अंतर-सांस्कृतिक संवाद।",

    sdg_equality: "SDG 10 का लक्ष्य देशों के भीतर और उनके बीच असमानताओं को कम करना है। इसमें समान अवसरों \
को बढ़ावा देना, भेदभाव से लड़ना और समाज में समावेशी भागीदारी सुनिश्चित करना शामिल है।",

    question: "मैं समझता हूं कि आप '{message}' के बारे में पूछ रहे हैं। कृपया अपना प्रश्न दोबारा लिखें ताकि \
मैं अधिक विशिष्ट जानकारी दे सकूं।",

    default_reply: "आपके संदेश के लिए धन्यवाद: '{message}'। मैं अनुवाद, प्रश्नों के उत्तर और समानता तथा \
समावेश के बारे में जानकारी देने के लिए यहां हूं। मैं आज आपकी किस प्रकार सहायता कर सकता हूं?",
};
