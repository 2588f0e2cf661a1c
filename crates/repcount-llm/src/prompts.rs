/// Prompt templates for LLM-assisted parsing
pub struct ExercisePrompts;

/// Longest utterance embedded in a prompt, in characters
const MAX_INPUT_CHARS: usize = 500;

impl ExercisePrompts {
    /// Build the single-utterance parsing prompt
    pub fn build_parse_prompt(text: &str) -> String {
        format!(
            r#"Ти розбираєш короткі повідомлення про виконані вправи. Текст міг пройти через розпізнавання мовлення і містити помилки.

## Вхідний текст
"{text}"

---

## Що повернути

Рівно ОДИН JSON-об'єкт і нічого більше:

- якщо текст описує один підхід вправи:
  {{"name": "повна назва вправи", "reps": ціле_число, "weight": ціле_число_або_null}}
- якщо текст НЕ описує вправу:
  {{"error": "not_exercise"}}

## Правила

1. **Повна назва.** Зберігай назву вправи повністю, з усіма уточненнями (хват, снаряд, положення тіла). Не зводь її до загальної форми: "французький жим лежачи" лишається "французький жим лежачи", а не "жим лежачи".
2. **Лише фонетичні помилки.** Виправляй тільки слова, які явно є спотвореною назвою вправи ("приїде" → "присідання", "відтискань я" → "відтискання", "підтягуван я" → "підтягування", "планк а" → "планка").
3. **Не вигадуй.** Якщо слово не схоже на вправу (банан, музика, привіт) або в тексті немає кількості повторень, поверни {{"error": "not_exercise"}}.
4. **Вага.** Вказуй вагу в кілограмах цілим числом; якщо ваги немає, став null.

## Приклади

"французький жим лежачи 12 повторів з вагою 40 кг" → {{"name": "французький жим лежачи", "reps": 12, "weight": 40}}
"жим штанги лежачи 10 разів 80 кг" → {{"name": "жим штанги лежачи", "reps": 10, "weight": 80}}
"присідання з штангою 15 повторів" → {{"name": "присідання з штангою", "reps": 15, "weight": null}}
"підтягування широким хватом 8 разів" → {{"name": "підтягування широким хватом", "reps": 8, "weight": null}}
"приїде 20 разів" → {{"name": "присідання", "reps": 20, "weight": null}}
"відтискань я 15" → {{"name": "відтискання", "reps": 15, "weight": null}}
"банан 20 разів" → {{"error": "not_exercise"}}
"музика грає" → {{"error": "not_exercise"}}

Поверни лише JSON, без пояснень і без markdown."#,
            text = sanitize_input(text),
        )
    }
}

/// Trim, cap the length on a character boundary, and keep the quoted block intact.
fn sanitize_input(text: &str) -> String {
    text.trim()
        .chars()
        .take(MAX_INPUT_CHARS)
        .map(|c| if c == '"' || c == '\n' { ' ' } else { c })
        .collect()
}
