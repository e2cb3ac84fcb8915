use crate::dataset::Dataset;
use serde_json::json;

/// Small, internally consistent dataset shared by the unit tests.
///
/// Ana (1) attends IPM T1 and TP1 plus BD T1, and T1s of both courses clash
/// on Monday morning. Duarte (4) is enrolled in IPM but has no shifts.
pub fn dataset() -> Dataset {
    Dataset::from_json_value(json!({
        "buildings": [
            { "id": "1", "name": "Edifício I", "abbreviation": "I" },
            { "id": "2", "name": "Edifício II", "abbreviation": "II" }
        ],
        "classrooms": [
            { "id": "1", "name": "I.1.01", "capacity": 60, "buildingId": 1 },
            { "id": "2", "name": "I.1.02", "capacity": 30, "buildingId": 1 },
            { "id": "3", "name": "II.0.10", "capacity": 20, "buildingId": 2 }
        ],
        "teachers": [
            { "id": "1", "name": "Rui Silva", "email": "rui@uni.pt" },
            { "id": "2", "name": "Marta Costa" }
        ],
        "directors": [
            { "id": "1", "name": "Diana", "email": "diana@uni.pt", "password": "admin" }
        ],
        "courses": [
            { "id": "1", "name": "Interação Pessoa-Máquina", "abbreviation": "IPM", "year": 2, "semester": 2, "degreeId": 1 },
            { "id": "2", "name": "Bases de Dados", "abbreviation": "BD", "year": 1, "semester": 1, "degreeId": 1 },
            { "id": "3", "name": "Cálculo", "abbreviation": "CAL", "year": 1, "semester": 1, "degreeId": 1 }
        ],
        "students": [
            { "id": "1", "name": "Ana", "email": "ana@uni.pt", "password": "ana123", "enrolled": [1, 2] },
            { "id": "2", "name": "Bruno", "email": "bruno@uni.pt", "password": "bruno123", "specialStatus": true, "enrolled": [2] },
            { "id": "3", "name": "Carla", "email": "carla@uni.pt", "password": "carla123", "enrolled": [1] },
            { "id": "4", "name": "Duarte", "email": "duarte@uni.pt", "password": "duarte123", "enrolled": [1] }
        ],
        "shifts": [
            { "id": "1", "courseId": 1, "classroomId": 1, "day": "Monday", "from": 9, "to": 11, "type": "T", "name": "T1", "teacherId": 1, "totalStudentsRegistered": 2 },
            { "id": "2", "courseId": 1, "classroomId": 2, "day": "Tuesday", "from": 14, "to": 16, "type": "TP", "name": "TP1", "teacherId": 1, "totalStudentsRegistered": 1 },
            { "id": "3", "courseId": 1, "classroomId": 3, "day": "Wednesday", "from": 10, "to": 12, "type": "TP", "name": "TP2", "teacherId": 2, "totalStudentsRegistered": 0 },
            { "id": "4", "courseId": 2, "classroomId": 1, "day": "Monday", "from": 10, "to": 12, "type": "T", "name": "T1", "teacherId": 2, "totalStudentsRegistered": 2 },
            { "id": "5", "courseId": 2, "classroomId": 3, "day": "Thursday", "from": 9, "to": 11, "type": "PL", "name": "PL1", "teacherId": 2, "totalStudentsRegistered": 1 }
        ],
        "allocations": [
            { "id": "1", "studentId": 1, "shiftId": 1 },
            { "id": "2", "studentId": 1, "shiftId": 2 },
            { "id": "3", "studentId": 1, "shiftId": 4 },
            { "id": "4", "studentId": 2, "shiftId": 4 },
            { "id": "5", "studentId": 2, "shiftId": 5 },
            { "id": "6", "studentId": 3, "shiftId": 1 }
        ],
        "conflicts": [
            { "id": "1", "studentId": 1, "courseIDs": [1, 2], "shiftIDs": [1, 4] }
        ],
        "shiftRequests": [
            { "id": "1", "shiftId": 3, "oldShiftId": 2, "courseId": 1, "studentId": 1, "response": null, "alternativeShiftId": null, "responseSeenByStudent": false, "message": "Trabalho às terças", "createdAt": "2025/03/10 09:15", "accepted": false },
            { "id": "2", "shiftId": 3, "oldShiftId": 2, "courseId": 1, "studentId": 3, "response": "Aceite", "alternativeShiftId": null, "responseSeenByStudent": true, "message": null, "createdAt": "2025/03/01 17:40", "accepted": true }
        ],
        "classroomRequests": [
            { "id": "1", "classroomId": 3, "oldClassroomId": 2, "teacherId": 1, "response": null, "responseSeenByTeacher": false, "message": "Sala maior", "createdAt": "2025/02/20 11:00" }
        ]
    }))
    .expect("fixture dataset is valid")
}
